//! Filesystem-safe export names.

/// Appended to every derived name.
pub const FILENAME_SUFFIX: &str = "_diary";

/// Extension the sinks add to the derived name.
pub const PDF_EXTENSION: &str = "pdf";

/// Derives the export name from a diary title.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the result is lower-cased
/// and `_diary` is appended. One `_` per character, so multi-byte characters
/// map to a single `_`.
pub fn derive_filename(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    name.push_str(FILENAME_SUFFIX);
    name
}

/// `derive_filename(title)` plus the PDF extension.
pub fn pdf_filename(title: &str) -> String {
    format!("{}.{PDF_EXTENSION}", derive_filename(title))
}
