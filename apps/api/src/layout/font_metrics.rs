//! Static font-metric tables for the three Helvetica faces used by the export.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Type1 AFM files. Kerning is ignored: the renderer places each line
//! as a single `Tj` run, so the sum of advance widths is exactly what the PDF
//! viewer draws for the base-14 fonts.
//!
//! Each table covers the printable WinAnsi (CP-1252) range: ASCII 0x20..=0x7E
//! plus the upper half 0x80..=0xFF. Characters outside CP-1252 are drawn as
//! `?` by the renderer and measured as `?` here.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Text style
// ────────────────────────────────────────────────────────────────────────────

/// Font face of a text block. Each style maps to one base-14 PDF font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Normal,
    Bold,
    Italic,
}

impl TextStyle {
    /// PostScript name of the base-14 font rendering this style.
    pub fn base_font(&self) -> &'static str {
        match self {
            TextStyle::Normal => "Helvetica",
            TextStyle::Bold => "Helvetica-Bold",
            TextStyle::Italic => "Helvetica-Oblique",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
///
/// `upper_widths[i]` = width of WinAnsi code `(i + 0x80)`. Codes CP-1252 leaves
/// undefined (0x81, 0x8D, 0x8F, 0x90, 0x9D) are never produced by
/// [`win_ansi_code`].
pub struct FontMetricTable {
    widths: [f32; 95],
    upper_widths: [f32; 128],
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        match win_ansi_code(c) {
            Some(code @ 0x20..=0x7E) => self.widths[(code - 0x20) as usize],
            Some(code @ 0x80..=0xFF) => self.upper_widths[(code - 0x80) as usize],
            _ => self.widths[(b'?' - 0x20) as usize],
        }
    }

    /// Width of `s` in layout units when set at `font_size_pt`.
    pub fn measure(&self, s: &str, font_size_pt: f32, units_per_point: f32) -> f32 {
        self.measure_str(s) * font_size_pt * units_per_point
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// WinAnsi (CP-1252) code for `c`, or `None` when the base-14 fonts cannot draw it.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII + 128 upper-half slots each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica. Also used for Helvetica-Oblique, which shares its advance widths.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    upper_widths: [
        // €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.556, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.556, 0.611, 0.556,
        // -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.556, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.556, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    space_width: 0.278,
};

/// Helvetica-Bold.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    #[rustfmt::skip]
    upper_widths: [
        // €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.556, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.556, 0.611, 0.556,
        // -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.556, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.556, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    space_width: 0.278,
};

/// Returns the static metric table for a given text style.
pub fn get_metrics(style: &TextStyle) -> &'static FontMetricTable {
    match style {
        TextStyle::Normal | TextStyle::Italic => &HELVETICA_TABLE,
        TextStyle::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&TextStyle::Normal);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(&TextStyle::Normal);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.278).abs() < 1e-4,
            "space width should be 0.278, got {width}"
        );
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&TextStyle::Normal);
        // "Diary" = D(0.722) + i(0.222) + a(0.556) + r(0.333) + y(0.500) = 2.333
        let width = metrics.measure_str("Diary");
        assert!(
            (width - 2.333).abs() < 1e-3,
            "Diary width should be ~2.333, got {width}"
        );
    }

    #[test]
    fn test_measure_str_win_ansi_upper_half() {
        let metrics = get_metrics(&TextStyle::Normal);
        for (text, expected) in [("—", 1.000), ("•", 0.350), ("’", 0.222), ("é", 0.556), ("Æ", 1.000)] {
            let width = metrics.measure_str(text);
            assert!((width - expected).abs() < 1e-4, "{text:?} measured {width}");
        }
        assert!((get_metrics(&TextStyle::Bold).measure_str("“") - 0.500).abs() < 1e-4);
    }

    #[test]
    fn test_unencodable_characters_measure_as_question_mark() {
        let metrics = get_metrics(&TextStyle::Normal);
        assert_eq!(metrics.measure_str("日"), metrics.measure_str("?"));
        assert_eq!(metrics.measure_str("\u{1F600}"), metrics.measure_str("?"));
    }

    #[test]
    fn test_win_ansi_code_mapping() {
        assert_eq!(win_ansi_code('a'), Some(b'a'));
        assert_eq!(win_ansi_code('é'), Some(0xE9));
        assert_eq!(win_ansi_code('€'), Some(0x80));
        assert_eq!(win_ansi_code('—'), Some(0x97));
        assert_eq!(win_ansi_code('\u{7F}'), None);
        assert_eq!(win_ansi_code('日'), None);
    }

    #[test]
    fn test_measure_scales_with_font_size() {
        let metrics = get_metrics(&TextStyle::Normal);
        let small = metrics.measure("entry", 10.0, 1.0);
        let large = metrics.measure("entry", 20.0, 1.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_bold_wider_than_normal() {
        let text = "Yesterday was a good day";
        let normal = get_metrics(&TextStyle::Normal).measure_str(text);
        let bold = get_metrics(&TextStyle::Bold).measure_str(text);
        assert!(bold > normal, "bold ({bold}) should be wider than normal ({normal})");
    }

    #[test]
    fn test_italic_shares_normal_widths() {
        let text = "Created: January 5, 2024";
        assert_eq!(
            get_metrics(&TextStyle::Italic).measure_str(text),
            get_metrics(&TextStyle::Normal).measure_str(text)
        );
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(TextStyle::Normal.base_font(), "Helvetica");
        assert_eq!(TextStyle::Bold.base_font(), "Helvetica-Bold");
        assert_eq!(TextStyle::Italic.base_font(), "Helvetica-Oblique");
    }
}
