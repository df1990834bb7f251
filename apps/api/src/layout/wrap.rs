//! Greedy word wrap.
//!
//! Explicit `\n` markers are honoured first; each paragraph is then filled word by
//! word until the next word would push the measured line past `max_width`.

use crate::layout::font_metrics::FontMetricTable;

/// One wrapped output line with its measured width in layout units.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
    /// Number of words on the line. A single-word line may exceed `max_width`.
    pub word_count: usize,
}

/// Wraps `text` to `max_width` layout units at `font_size_pt`.
///
/// Whitespace-only paragraphs produce no line. A word wider than `max_width` is
/// placed alone on its own line without hyphenation.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    units_per_point: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let scale = font_size_pt * units_per_point;
    let space_w = metrics.space_width * scale;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let mut word_count = 0usize;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.measure(word, font_size_pt, units_per_point);

            if word_count > 0 && current_width + space_w + word_w > max_width {
                // Current line is full: flush it and start over with this word.
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                    word_count,
                });
                current.push_str(word);
                current_width = word_w;
                word_count = 1;
            } else {
                if word_count > 0 {
                    current.push(' ');
                    current_width += space_w;
                }
                current.push_str(word);
                current_width += word_w;
                word_count += 1;
            }
        }

        if word_count > 0 {
            lines.push(WrappedLine {
                text: current,
                width: current_width,
                word_count,
            });
        }
    }

    lines
}
