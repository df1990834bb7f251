//! Layout contract: checks the pagination invariants on a finished document.
//!
//! # Contract rules
//! - Pages are stored in index order and every page holds at least one element
//! - Within a page, fragment `y` strictly increases
//! - No fragment's bottom edge passes `height - margin`
//! - A line holding more than one word never exceeds its wrap width
//!
//! The composer guarantees these by construction; the check runs after every
//! export and any violation is logged.

use serde::{Deserialize, Serialize};

use crate::layout::engine::Document;

/// Width tolerance for float accumulation in the wrap measurement.
const WIDTH_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutViolation {
    /// `pages[position].index != position`.
    PageOutOfOrder { position: usize, index: usize },
    /// A page with neither fragments nor rules.
    EmptyPage { page: usize },
    /// Fragment `line` on `page` does not sit below the previous one.
    NonIncreasingOffset { page: usize, line: usize, y: f32, previous_y: f32 },
    /// Fragment bottom edge lies below the bottom margin.
    BottomOverflow { page: usize, line: usize, bottom: f32, limit: f32 },
    /// A multi-word line wider than the width it was wrapped to.
    LineTooWide { page: usize, line: usize, width: f32, max_width: f32 },
}

/// Returns every violation found in `document`; empty when the layout is sound.
pub fn check_document(document: &Document) -> Vec<LayoutViolation> {
    let limit = document.geometry.bottom_limit();
    let mut violations = Vec::new();

    for (position, page) in document.pages.iter().enumerate() {
        if page.index != position {
            violations.push(LayoutViolation::PageOutOfOrder {
                position,
                index: page.index,
            });
        }
        if page.fragments.is_empty() && page.rules.is_empty() {
            violations.push(LayoutViolation::EmptyPage { page: position });
        }

        let mut previous_y: Option<f32> = None;
        for (line, fragment) in page.fragments.iter().enumerate() {
            if let Some(prev) = previous_y {
                if fragment.y <= prev {
                    violations.push(LayoutViolation::NonIncreasingOffset {
                        page: position,
                        line,
                        y: fragment.y,
                        previous_y: prev,
                    });
                }
            }
            previous_y = Some(fragment.y);

            let bottom = fragment.y + fragment.height;
            if bottom > limit + WIDTH_EPSILON {
                violations.push(LayoutViolation::BottomOverflow {
                    page: position,
                    line,
                    bottom,
                    limit,
                });
            }

            if fragment.word_count > 1 && fragment.width > fragment.max_width + WIDTH_EPSILON {
                violations.push(LayoutViolation::LineTooWide {
                    page: position,
                    line,
                    width: fragment.width,
                    max_width: fragment.max_width,
                });
            }
        }
    }

    violations
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::{Alignment, Fragment, Page, PageWriter, TextBlock};
    use crate::layout::font_metrics::TextStyle;
    use crate::layout::geometry::PageGeometry;

    fn fragment(y: f32, width: f32, word_count: usize) -> Fragment {
        Fragment {
            text: "x".to_string(),
            x: 20.0,
            y,
            width,
            height: 4.8,
            max_width: 170.0,
            word_count,
            font_size: 12.0,
            style: TextStyle::Normal,
            alignment: Alignment::Left,
        }
    }

    fn document(fragments: Vec<Fragment>) -> Document {
        Document {
            geometry: PageGeometry::a4(),
            pages: vec![Page {
                index: 0,
                fragments,
                rules: vec![],
            }],
        }
    }

    #[test]
    fn test_writer_output_satisfies_contract() {
        let mut w = PageWriter::new(PageGeometry::a4());
        let text = "Some words that will wrap across many lines. ".repeat(200);
        w.layout(
            &TextBlock::new(text, 12.0, TextStyle::Normal),
            20.0,
            170.0,
            w.start(),
        );
        let doc = w.finish();
        assert!(doc.page_count() > 1);
        assert_eq!(check_document(&doc), vec![]);
    }

    #[test]
    fn test_detects_non_increasing_offset() {
        let doc = document(vec![fragment(40.0, 10.0, 1), fragment(40.0, 10.0, 1)]);
        let violations = check_document(&doc);
        assert!(matches!(
            violations.as_slice(),
            [LayoutViolation::NonIncreasingOffset { line: 1, .. }]
        ));
    }

    #[test]
    fn test_detects_bottom_overflow() {
        let doc = document(vec![fragment(275.0, 10.0, 1)]);
        assert!(matches!(
            check_document(&doc).as_slice(),
            [LayoutViolation::BottomOverflow { page: 0, line: 0, .. }]
        ));
    }

    #[test]
    fn test_lone_overlong_word_is_accepted() {
        let doc = document(vec![fragment(20.0, 400.0, 1)]);
        assert!(check_document(&doc).is_empty());
    }

    #[test]
    fn test_overlong_multi_word_line_is_flagged() {
        let doc = document(vec![fragment(20.0, 400.0, 3)]);
        assert!(matches!(
            check_document(&doc).as_slice(),
            [LayoutViolation::LineTooWide { .. }]
        ));
    }

    #[test]
    fn test_detects_empty_page() {
        let mut doc = document(vec![fragment(20.0, 10.0, 1)]);
        doc.pages.push(Page {
            index: 1,
            fragments: vec![],
            rules: vec![],
        });
        assert_eq!(
            check_document(&doc),
            vec![LayoutViolation::EmptyPage { page: 1 }]
        );
    }
}
