//! Page fill analysis: how much of each page's content area the export uses.
//!
//! Reported in the preview response so the front end can show page thumbnails
//! with a density hint.
//!
//! # Page fill rules
//! - Fill ≥ 90%  → Full
//! - Fill < 25%  → Sparse
//! - otherwise   → Partial

use serde::{Deserialize, Serialize};

use crate::layout::engine::Document;

const FULL_THRESHOLD: f32 = 0.90;
const SPARSE_THRESHOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Full,
    Partial,
    Sparse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFill {
    pub page: usize,
    pub line_count: usize,
    /// Distance from the top margin to the lowest occupied point.
    pub used_height: f32,
    /// `used_height / content_height`, in 0.0–1.0.
    pub fill_fraction: f32,
    pub verdict: PageFillVerdict,
}

/// Analyzes every page of `document`.
pub fn analyze_pages(document: &Document) -> Vec<PageFill> {
    let geometry = &document.geometry;
    let available = geometry.content_height();

    document
        .pages
        .iter()
        .map(|page| {
            let fragment_bottom = page.fragments.iter().map(|f| f.y + f.height);
            let rule_bottom = page.rules.iter().map(|r| r.y);
            let lowest = fragment_bottom
                .chain(rule_bottom)
                .fold(geometry.margin, f32::max);

            let used_height = (lowest - geometry.margin).max(0.0);
            let fill_fraction = (used_height / available).clamp(0.0, 1.0);

            let verdict = if fill_fraction >= FULL_THRESHOLD {
                PageFillVerdict::Full
            } else if fill_fraction < SPARSE_THRESHOLD {
                PageFillVerdict::Sparse
            } else {
                PageFillVerdict::Partial
            };

            PageFill {
                page: page.index,
                line_count: page.fragments.len(),
                used_height,
                fill_fraction,
                verdict,
            }
        })
        .collect()
}
