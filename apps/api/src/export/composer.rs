//! Document composer: lays out the cover section and one page group per entry.
//!
//! # Structure
//! - Cover: diary title (centered, bold 24pt), optional description (centered
//!   14pt), `Generated on <date>` (centered, italic 10pt)
//! - Per entry, always starting on a new page: title (bold 18pt), `Created:`
//!   line, `Updated:` line only when the entry was edited, separator rule, body
//!
//! Composition is a pure function of its inputs: "now" and the locale arrive
//! through [`ComposeOptions`].

use chrono::{DateTime, Utc};

use crate::export::dates::DateFormatter;
use crate::export::normalizer::normalize;
use crate::layout::{Document, LayoutCursor, PageGeometry, PageWriter, TextBlock, TextStyle};
use crate::models::diary::{Diary, Entry};

/// Title used when the diary title is empty or whitespace.
pub const UNTITLED_DIARY: &str = "Untitled Diary";

const COVER_TITLE_SIZE: f32 = 24.0;
const DESCRIPTION_SIZE: f32 = 14.0;
const GENERATED_SIZE: f32 = 10.0;
const ENTRY_TITLE_SIZE: f32 = 18.0;
const METADATA_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 12.0;

/// Spacing after an ordinary block.
const BLOCK_GAP: f32 = 5.0;
/// Spacing after a cover block.
const SECTION_GAP: f32 = 10.0;
/// Vertical space the separator rule occupies.
const SEPARATOR_ADVANCE: f32 = 10.0;
/// Distance from the top of a `Created:`/`Updated:` line to whatever follows it.
const METADATA_ADVANCE: f32 = 15.0;

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub generated_at: DateTime<Utc>,
    pub dates: DateFormatter,
}

/// The title the export actually prints.
pub fn effective_title(diary: &Diary) -> &str {
    let title = diary.title.trim();
    if title.is_empty() {
        UNTITLED_DIARY
    } else {
        title
    }
}

/// Composes the full paginated document for `diary` and its `entries`, in input order.
pub fn compose(
    diary: &Diary,
    entries: &[Entry],
    geometry: &PageGeometry,
    options: &ComposeOptions,
) -> Document {
    let mut writer = PageWriter::new(geometry.clone());
    let cursor = writer.start();
    let mut cursor = compose_cover(&mut writer, diary, options, cursor);

    for entry in entries {
        cursor = writer.force_break(cursor);
        cursor = compose_entry(&mut writer, entry, options, cursor);
    }

    writer.finish()
}

fn compose_cover(
    writer: &mut PageWriter,
    diary: &Diary,
    options: &ComposeOptions,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let center = writer.geometry().center_x();
    let width = writer.geometry().content_width();

    let title = TextBlock::new(effective_title(diary), COVER_TITLE_SIZE, TextStyle::Bold).centered();
    let mut cursor = writer.layout(&title, center, width, cursor);
    cursor = writer.gap(cursor, SECTION_GAP);

    if let Some(description) = diary.description.as_deref().map(str::trim) {
        if !description.is_empty() {
            let block = TextBlock::new(description, DESCRIPTION_SIZE, TextStyle::Normal).centered();
            cursor = writer.layout(&block, center, width, cursor);
            cursor = writer.gap(cursor, BLOCK_GAP + SECTION_GAP);
        }
    }

    let generated = format!("Generated on {}", options.dates.date(&options.generated_at));
    let block = TextBlock::new(generated, GENERATED_SIZE, TextStyle::Italic).centered();
    writer.layout(&block, center, width, cursor)
}

fn compose_entry(
    writer: &mut PageWriter,
    entry: &Entry,
    options: &ComposeOptions,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let left = writer.geometry().margin;
    let width = writer.geometry().content_width();

    let metadata_gap = METADATA_ADVANCE - writer.geometry().line_advance(METADATA_SIZE);

    let title = TextBlock::new(entry.title.trim(), ENTRY_TITLE_SIZE, TextStyle::Bold);
    let mut cursor = writer.layout(&title, left, width, cursor);
    cursor = writer.gap(cursor, BLOCK_GAP);

    let created = format!("Created: {}", options.dates.timestamp(&entry.created_at));
    cursor = writer.layout(
        &TextBlock::new(created, METADATA_SIZE, TextStyle::Italic),
        left,
        width,
        cursor,
    );
    cursor = writer.gap(cursor, metadata_gap);

    if entry.was_edited() {
        let updated = format!("Updated: {}", options.dates.timestamp(&entry.updated_at));
        cursor = writer.layout(
            &TextBlock::new(updated, METADATA_SIZE, TextStyle::Italic),
            left,
            width,
            cursor,
        );
        cursor = writer.gap(cursor, metadata_gap);
    }

    cursor = writer.rule(cursor, SEPARATOR_ADVANCE);

    let body = normalize(&entry.content);
    if !body.is_empty() {
        cursor = writer.layout(
            &TextBlock::new(body, BODY_SIZE, TextStyle::Normal),
            left,
            width,
            cursor,
        );
        cursor = writer.gap(cursor, BLOCK_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::contract::check_document;
    use crate::layout::engine::Alignment;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 15, 45, 0).unwrap()
    }

    fn options() -> ComposeOptions {
        ComposeOptions {
            generated_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
            dates: DateFormatter::default(),
        }
    }

    fn diary(title: &str, description: Option<&str>) -> Diary {
        Diary {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn entry(title: &str, content: &str) -> Entry {
        Entry {
            title: title.to_string(),
            content: content.to_string(),
            created_at: t0(),
            updated_at: t0(),
        }
    }

    fn texts(doc: &Document, page: usize) -> Vec<&str> {
        doc.pages[page]
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect()
    }

    fn long_body(paragraphs: usize) -> String {
        (0..paragraphs)
            .map(|i| {
                format!(
                    "<p>Paragraph {i}: the walk along the river took most of the afternoon \
                     and the light on the water kept changing as the clouds moved in.</p>"
                )
            })
            .collect()
    }

    #[test]
    fn test_single_entry_scenario() {
        let doc = compose(
            &diary("2024", Some("")),
            &[entry("Day 1", "<p>Short.</p>")],
            &PageGeometry::a4(),
            &options(),
        );

        assert_eq!(doc.page_count(), 2);
        assert_eq!(texts(&doc, 0), vec!["2024", "Generated on February 1, 2024"]);
        assert_eq!(
            texts(&doc, 1),
            vec!["Day 1", "Created: January 5, 2024, 03:45 PM", "Short."]
        );

        let page = &doc.pages[1];
        assert_eq!(page.rules.len(), 1);
        let rule_y = page.rules[0].y;
        assert!(page.fragments[1].y < rule_y, "separator sits below the timestamp");
        assert!(page.fragments[2].y > rule_y, "body starts below the separator");
    }

    #[test]
    fn test_cover_is_centered_and_styled() {
        let doc = compose(&diary("2024", None), &[], &PageGeometry::a4(), &options());
        let cover = &doc.pages[0].fragments;
        assert_eq!(cover[0].style, TextStyle::Bold);
        assert_eq!(cover[0].font_size, 24.0);
        assert_eq!(cover[1].style, TextStyle::Italic);
        assert!(cover
            .iter()
            .all(|f| f.alignment == Alignment::Center && f.x == 105.0));
    }

    #[test]
    fn test_description_renders_between_title_and_generated_line() {
        let doc = compose(
            &diary("Travels", Some("Notes from the road")),
            &[],
            &PageGeometry::a4(),
            &options(),
        );
        assert_eq!(
            texts(&doc, 0),
            vec!["Travels", "Notes from the road", "Generated on February 1, 2024"]
        );
        assert_eq!(doc.pages[0].fragments[1].style, TextStyle::Normal);
    }

    #[test]
    fn test_edited_entry_lists_created_then_updated() {
        let mut e = entry("Day 2", "<p>Edited later.</p>");
        e.updated_at = t0() + Duration::hours(2);
        let doc = compose(&diary("2024", None), &[e], &PageGeometry::a4(), &options());
        assert_eq!(
            texts(&doc, 1),
            vec![
                "Day 2",
                "Created: January 5, 2024, 03:45 PM",
                "Updated: January 5, 2024, 05:45 PM",
                "Edited later."
            ]
        );
        let page = &doc.pages[1];
        assert!(page.fragments[2].y < page.rules[0].y);
    }

    #[test]
    fn test_metadata_lines_advance_fifteen_units() {
        let mut e = entry("Day 3", "<p>Body.</p>");
        e.updated_at = t0() + Duration::minutes(30);
        let doc = compose(&diary("2024", None), &[e], &PageGeometry::a4(), &options());
        let page = &doc.pages[1];
        let created_y = page.fragments[1].y;
        let updated_y = page.fragments[2].y;
        let title_advance = doc.geometry.line_advance(18.0);
        assert!((created_y - (page.fragments[0].y + title_advance + 5.0)).abs() < 1e-3);
        assert!((updated_y - created_y - 15.0).abs() < 1e-3);
        assert!((page.rules[0].y - updated_y - 15.0).abs() < 1e-3);
        assert!((page.fragments[3].y - page.rules[0].y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_body_still_renders_header_block() {
        let doc = compose(
            &diary("2024", None),
            &[entry("Nothing yet", "<p><br></p>")],
            &PageGeometry::a4(),
            &options(),
        );
        assert_eq!(doc.page_count(), 2);
        assert_eq!(texts(&doc, 1).len(), 2);
        assert_eq!(doc.pages[1].rules.len(), 1);
    }

    #[test]
    fn test_empty_title_uses_placeholder() {
        let doc = compose(&diary("   ", None), &[], &PageGeometry::a4(), &options());
        assert_eq!(texts(&doc, 0)[0], UNTITLED_DIARY);
    }

    #[test]
    fn test_every_entry_starts_a_new_page() {
        let entries: Vec<Entry> = (0..5).map(|i| entry(&format!("Day {i}"), "<p>x</p>")).collect();
        let doc = compose(&diary("2024", None), &entries, &PageGeometry::a4(), &options());
        assert_eq!(doc.page_count(), 6);
        for (i, page) in doc.pages.iter().skip(1).enumerate() {
            assert_eq!(page.fragments[0].text, format!("Day {i}"));
            assert_eq!(page.fragments[0].y, doc.geometry.margin);
        }
    }

    #[test]
    fn test_long_entries_overflow_onto_more_pages() {
        let entries = vec![
            entry("Long", &long_body(80)),
            entry("Short", "<p>Fine.</p>"),
            entry("Long again", &long_body(40)),
        ];
        let doc = compose(&diary("2024", None), &entries, &PageGeometry::a4(), &options());
        assert!(doc.page_count() > entries.len() + 1);

        // Entry titles appear in input order, each at the top of its page.
        let titles: Vec<&str> = doc
            .pages
            .iter()
            .filter_map(|p| p.fragments.first())
            .filter(|f| f.style == TextStyle::Bold && f.font_size == 18.0)
            .map(|f| f.text.as_str())
            .collect();
        assert_eq!(titles, vec!["Long", "Short", "Long again"]);
    }

    #[test]
    fn test_layout_invariants_hold() {
        let entries = vec![
            entry("A", &long_body(60)),
            entry("B", "<ul><li>one</li><li>two</li></ul>"),
            entry("C", &format!("<p>{}</p>", "x".repeat(400))),
        ];
        let doc = compose(
            &diary("A rather long diary title that will certainly need to wrap onto a second line", Some("desc")),
            &entries,
            &PageGeometry::a4(),
            &options(),
        );

        assert_eq!(check_document(&doc), vec![]);
        for (i, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.index, i);
            for pair in page.fragments.windows(2) {
                assert!(pair[1].y > pair[0].y);
            }
            for f in &page.fragments {
                assert!(f.y + f.height <= doc.geometry.bottom_limit() + 1e-3);
                if f.word_count > 1 {
                    assert!(f.width <= f.max_width + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let entries = vec![entry("A", &long_body(30)), entry("B", "<p>b</p>")];
        let d = diary("Same", Some("inputs"));
        let first = compose(&d, &entries, &PageGeometry::a4(), &options());
        let second = compose(&d, &entries, &PageGeometry::a4(), &options());
        assert_eq!(first, second);
    }

    #[test]
    fn test_entries_are_not_resorted() {
        let mut older = entry("Older", "");
        older.created_at = t0() - Duration::days(3);
        older.updated_at = older.created_at;
        let newer = entry("Newer", "");
        let doc = compose(
            &diary("2024", None),
            &[newer, older],
            &PageGeometry::a4(),
            &options(),
        );
        assert_eq!(texts(&doc, 1)[0], "Newer");
        assert_eq!(texts(&doc, 2)[0], "Older");
    }
}
