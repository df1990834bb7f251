//! Page geometry shared by the layout engine and the PDF renderer.
//!
//! All lengths are layout units (millimetres). Font sizes stay in points and are
//! converted with `units_per_point` whenever a width or leading is computed.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Layout parameters for every page of a document. Never mutated during layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,
    pub units_per_point: f32,
    /// Line advance as a fraction of the font size, for body text.
    pub body_leading: f32,
    /// Line advance as a fraction of the font size, for headings.
    pub heading_leading: f32,
    /// Font sizes at or above this are laid out with `heading_leading`.
    pub heading_threshold_pt: f32,
}

impl PageGeometry {
    /// A4 portrait (210 × 297 mm), 20 mm margins.
    pub fn a4() -> Self {
        Self::with_size(210.0, 297.0)
    }

    /// US letter portrait (8.5" × 11"), 20 mm margins.
    pub fn letter() -> Self {
        Self::with_size(215.9, 279.4)
    }

    fn with_size(width: f32, height: f32) -> Self {
        PageGeometry {
            width,
            height,
            margin: 20.0,
            units_per_point: MM_PER_POINT,
            body_leading: 0.4,
            heading_leading: 0.42,
            heading_threshold_pt: 18.0,
        }
    }

    /// Vertical distance between successive lines set at `font_size_pt`.
    pub fn line_advance(&self, font_size_pt: f32) -> f32 {
        if font_size_pt >= self.heading_threshold_pt {
            font_size_pt * self.heading_leading
        } else {
            font_size_pt * self.body_leading
        }
    }

    /// Width available between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y any line may reach (its bottom edge included).
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }

    /// Usable height between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_sanity() {
        let g = PageGeometry::a4();
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.bottom_limit(), 277.0);
        assert_eq!(g.content_height(), 257.0);
        assert_eq!(g.center_x(), 105.0);
    }

    #[test]
    fn test_body_line_advance_is_forty_percent_of_size() {
        let g = PageGeometry::a4();
        assert!((g.line_advance(12.0) - 4.8).abs() < 1e-4);
        assert!((g.line_advance(10.0) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_line_advance_has_larger_leading() {
        let g = PageGeometry::a4();
        assert!(g.line_advance(24.0) > 24.0 * g.body_leading);
        assert!((g.line_advance(18.0) - 18.0 * 0.42).abs() < 1e-4);
    }

    #[test]
    fn test_letter_is_shorter_than_a4() {
        assert!(PageGeometry::letter().height < PageGeometry::a4().height);
    }
}
