//! PDF serialization of a composed [`Document`].
//!
//! Text uses the base-14 Helvetica faces with WinAnsi encoding, so no font
//! program is embedded and the layout metrics match what viewers draw. Layout
//! units (mm, y growing downwards) become PDF points with y growing upwards.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::font_metrics::win_ansi_code;
use crate::layout::{Document, Fragment, Rule, TextStyle};

/// Helvetica ascender height in em; places the baseline inside the line box.
const ASCENT_EM: f32 = 0.718;
/// Separator colour (light grey) and width in points.
const RULE_GRAY: f32 = 200.0 / 255.0;
const RULE_WIDTH_PT: f32 = 0.5;

const FONT_STYLES: [(TextStyle, &[u8]); 3] = [
    (TextStyle::Normal, b"F1"),
    (TextStyle::Bold, b"F2"),
    (TextStyle::Italic, b"F3"),
];

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Serializes `document` to PDF bytes. `title` goes into the document info.
pub fn render_pdf(document: &Document, title: &str) -> Vec<u8> {
    let geometry = &document.geometry;
    let scale = 1.0 / geometry.units_per_point;
    let page_width_pt = geometry.width * scale;
    let page_height_pt = geometry.height * scale;

    let mut pdf = Pdf::new();
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<Ref> = FONT_STYLES.iter().map(|_| alloc.bump()).collect();
    let page_ids: Vec<(Ref, Ref)> = document
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    for ((style, _), font_id) in FONT_STYLES.iter().zip(&font_ids) {
        pdf.type1_font(*font_id)
            .base_font(Name(style.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        let mut page_writer = pdf.page(*page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, page_width_pt, page_height_pt))
            .parent(page_tree_id)
            .contents(*content_id);
        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        for ((_, name), font_id) in FONT_STYLES.iter().zip(&font_ids) {
            fonts.pair(Name(*name), *font_id);
        }
        fonts.finish();
        resources.finish();
        page_writer.finish();

        let mut content = Content::new();
        for rule in &page.rules {
            draw_rule(&mut content, rule, scale, page_height_pt);
        }
        for fragment in &page.fragments {
            draw_fragment(&mut content, fragment, scale, page_height_pt);
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

fn draw_fragment(content: &mut Content, fragment: &Fragment, scale: f32, page_height_pt: f32) {
    let x = fragment.left() * scale;
    let baseline = fragment.y * scale + fragment.font_size * ASCENT_EM;
    let encoded = encode_win_ansi(&fragment.text);

    content.begin_text();
    content.set_font(Name(font_resource(fragment.style)), fragment.font_size);
    content.next_line(x, page_height_pt - baseline);
    content.show(Str(&encoded));
    content.end_text();
}

fn draw_rule(content: &mut Content, rule: &Rule, scale: f32, page_height_pt: f32) {
    let y = page_height_pt - rule.y * scale;
    content.save_state();
    content.set_stroke_rgb(RULE_GRAY, RULE_GRAY, RULE_GRAY);
    content.set_line_width(RULE_WIDTH_PT);
    content.move_to(rule.x1 * scale, y);
    content.line_to(rule.x2 * scale, y);
    content.stroke();
    content.restore_state();
}

fn font_resource(style: TextStyle) -> &'static [u8] {
    FONT_STYLES
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, name)| *name)
        .unwrap_or(b"F1")
}

/// Encodes text for a WinAnsi (CP-1252) simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(b'?'))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
