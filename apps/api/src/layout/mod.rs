// Layout engine: font metrics, greedy word wrap, page-break decisions.
// Everything here is synchronous and pure; callers on the async side run it
// inside tokio::task::spawn_blocking.

pub mod contract;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod page_fill;
pub mod wrap;

// Re-export the public API consumed by the export composer and renderer.
pub use engine::{Document, Fragment, LayoutCursor, Page, PageWriter, Rule, TextBlock};
pub use font_metrics::TextStyle;
pub use geometry::PageGeometry;
