//! Layout engine: places wrapped text blocks on pages and decides page breaks.
//!
//! # Break rule
//! Before a line is emitted, if `cursor.y + line_advance(font_size)` would pass
//! `height - margin`, the cursor moves to the top of the next page. This is the
//! only overflow trigger; lines are never split across pages. The composer may
//! additionally force a break with [`PageWriter::force_break`].
//!
//! Pages are materialized when the first fragment or rule lands on them, so a
//! trailing gap that overflows never leaves a blank page at the end.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, TextStyle};
use crate::layout::geometry::PageGeometry;
use crate::layout::wrap::wrap_text;

// ────────────────────────────────────────────────────────────────────────────
// Input types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

/// A logically distinct unit of text laid out with one font and alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub font_size: f32,
    pub style: TextStyle,
    pub alignment: Alignment,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font_size: f32, style: TextStyle) -> Self {
        TextBlock {
            text: text.into(),
            font_size,
            style,
            alignment: Alignment::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }
}

/// Current page index and vertical write position within that page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One positioned line of text.
///
/// `x` is the anchor: the left edge for `Left`, the line's midpoint for `Center`.
/// `y` is the top of the line box; `height` is the line advance it occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Wrap width the line was fitted to.
    pub max_width: f32,
    /// Words on the line; a lone word is allowed to exceed `max_width`.
    pub word_count: usize,
    pub font_size: f32,
    pub style: TextStyle,
    pub alignment: Alignment,
}

impl Fragment {
    /// Left edge of the drawn text.
    pub fn left(&self) -> f32 {
        match self.alignment {
            Alignment::Left => self.x,
            Alignment::Center => self.x - self.width / 2.0,
        }
    }
}

/// A horizontal separator line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub fragments: Vec<Fragment>,
    pub rules: Vec<Rule>,
}

impl Page {
    fn new(index: usize) -> Self {
        Page {
            index,
            fragments: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// The finished paginated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates pages while the composer threads a [`LayoutCursor`] through it.
pub struct PageWriter {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl PageWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        PageWriter {
            geometry,
            pages: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Cursor at the top margin of the first page.
    pub fn start(&self) -> LayoutCursor {
        LayoutCursor {
            page: 0,
            y: self.geometry.margin,
        }
    }

    /// Lays out `block` starting at `cursor`, wrapping to `max_width`.
    ///
    /// Empty text emits nothing and returns the cursor unchanged.
    pub fn layout(
        &mut self,
        block: &TextBlock,
        x: f32,
        max_width: f32,
        cursor: LayoutCursor,
    ) -> LayoutCursor {
        let metrics = get_metrics(&block.style);
        let advance = self.geometry.line_advance(block.font_size);
        let lines = wrap_text(
            &block.text,
            metrics,
            block.font_size,
            self.geometry.units_per_point,
            max_width,
        );

        let mut cursor = cursor;
        for line in lines {
            cursor = self.ensure_room(cursor, advance);
            let fragment = Fragment {
                text: line.text,
                x,
                y: cursor.y,
                width: line.width,
                height: advance,
                max_width,
                word_count: line.word_count,
                font_size: block.font_size,
                style: block.style,
                alignment: block.alignment,
            };
            self.page_mut(cursor.page).fragments.push(fragment);
            cursor.y += advance;
        }
        cursor
    }

    /// Adds vertical space. A gap that would overflow moves to the next page instead.
    pub fn gap(&mut self, cursor: LayoutCursor, amount: f32) -> LayoutCursor {
        let mut cursor = self.ensure_room(cursor, amount);
        cursor.y += amount;
        cursor
    }

    /// Starts a new page unconditionally.
    pub fn force_break(&mut self, cursor: LayoutCursor) -> LayoutCursor {
        // A page the cursor reached through an overflowing gap holds nothing yet,
        // so it already is the fresh page.
        let page = if cursor.page >= self.pages.len() {
            cursor.page
        } else {
            cursor.page + 1
        };
        LayoutCursor {
            page,
            y: self.geometry.margin,
        }
    }

    /// Draws a separator across the content width at `cursor.y`, then advances.
    pub fn rule(&mut self, cursor: LayoutCursor, advance: f32) -> LayoutCursor {
        let mut cursor = self.ensure_room(cursor, advance);
        let rule = Rule {
            x1: self.geometry.margin,
            x2: self.geometry.width - self.geometry.margin,
            y: cursor.y,
        };
        self.page_mut(cursor.page).rules.push(rule);
        cursor.y += advance;
        cursor
    }

    pub fn finish(self) -> Document {
        Document {
            geometry: self.geometry,
            pages: self.pages,
        }
    }

    /// Applies the break rule for something `height` tall.
    fn ensure_room(&self, cursor: LayoutCursor, height: f32) -> LayoutCursor {
        if cursor.y + height > self.geometry.bottom_limit() {
            LayoutCursor {
                page: cursor.page + 1,
                y: self.geometry.margin,
            }
        } else {
            cursor
        }
    }

    fn page_mut(&mut self, index: usize) -> &mut Page {
        while self.pages.len() <= index {
            let next = self.pages.len();
            self.pages.push(Page::new(next));
        }
        &mut self.pages[index]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> PageWriter {
        PageWriter::new(PageGeometry::a4())
    }

    fn body(text: &str) -> TextBlock {
        TextBlock::new(text, 12.0, TextStyle::Normal)
    }

    #[test]
    fn test_empty_text_leaves_cursor_unchanged() {
        let mut w = writer();
        let start = w.start();
        let end = w.layout(&body(""), 20.0, 170.0, start);
        assert_eq!(start, end);
        assert_eq!(w.finish().page_count(), 0);
    }

    #[test]
    fn test_single_line_advances_by_line_advance() {
        let mut w = writer();
        let start = w.start();
        let end = w.layout(&body("Short."), 20.0, 170.0, start);
        assert_eq!(end.page, 0);
        assert!((end.y - (20.0 + 4.8)).abs() < 1e-4);

        let doc = w.finish();
        assert_eq!(doc.pages[0].fragments.len(), 1);
        assert_eq!(doc.pages[0].fragments[0].y, 20.0);
    }

    #[test]
    fn test_overflow_breaks_between_lines() {
        let mut w = writer();
        let text = "line\n".repeat(120);
        let end = w.layout(&body(&text), 20.0, 170.0, w.start());
        let doc = w.finish();

        // 257 units of content height / 4.8 per line = 53 lines per page.
        assert_eq!(doc.pages[0].fragments.len(), 53);
        assert_eq!(doc.page_count(), 3);
        assert_eq!(end.page, 2);
        for page in &doc.pages {
            assert_eq!(page.fragments[0].y, 20.0, "each page restarts at the margin");
            for f in &page.fragments {
                assert!(f.y + f.height <= doc.geometry.bottom_limit() + 1e-3);
            }
        }
    }

    #[test]
    fn test_gap_that_overflows_moves_to_next_page_without_materializing_it() {
        let mut w = writer();
        let near_bottom = LayoutCursor { page: 0, y: 275.0 };
        let after = w.gap(near_bottom, 5.0);
        assert_eq!(after.page, 1);
        assert!((after.y - 25.0).abs() < 1e-4);
        assert_eq!(w.finish().page_count(), 0);
    }

    #[test]
    fn test_force_break_always_starts_new_page() {
        let mut w = writer();
        let c = w.layout(&body("cover"), 20.0, 170.0, w.start());
        let c = w.force_break(c);
        assert_eq!(c, LayoutCursor { page: 1, y: 20.0 });
        let c = w.layout(&body("entry"), 20.0, 170.0, c);
        let doc = w.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].fragments[0].text, "entry");
        assert_eq!(c.page, 1);
    }

    #[test]
    fn test_force_break_after_overflowing_gap_does_not_leave_blank_page() {
        let mut w = writer();
        let c = w.layout(&body("cover"), 20.0, 170.0, LayoutCursor { page: 0, y: 270.0 });
        let c = w.gap(c, 5.0); // overflows onto page 1 (not yet materialized)
        let c = w.force_break(c);
        assert_eq!(c.page, 1);
        w.layout(&body("entry"), 20.0, 170.0, c);
        let doc = w.finish();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages.iter().all(|p| !p.fragments.is_empty()));
    }

    #[test]
    fn test_rule_spans_content_width() {
        let mut w = writer();
        let c = w.rule(w.start(), 10.0);
        assert!((c.y - 30.0).abs() < 1e-4);
        let doc = w.finish();
        let rule = &doc.pages[0].rules[0];
        assert_eq!((rule.x1, rule.x2, rule.y), (20.0, 190.0, 20.0));
    }

    #[test]
    fn test_centered_fragment_left_edge() {
        let mut w = writer();
        let block = TextBlock::new("2024", 24.0, TextStyle::Bold).centered();
        w.layout(&block, 105.0, 170.0, w.start());
        let doc = w.finish();
        let f = &doc.pages[0].fragments[0];
        assert_eq!(f.alignment, Alignment::Center);
        assert!((f.left() - (105.0 - f.width / 2.0)).abs() < 1e-4);
    }
}
