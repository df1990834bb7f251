//! Content normalizer: rich-text HTML to plain text for linear layout.
//!
//! A small deterministic tokenizer: it recognizes tags, comments and raw-text
//! elements, and never depends on an HTML engine. Markup is inert. Script and
//! style bodies are skipped without being looked at.
//!
//! # Output rules
//! - Block elements and `<br>` end the current line
//! - Inline formatting is dropped; whitespace runs collapse to one space
//! - Lines are trimmed, blank lines are dropped
//! - List items get a `•` or `N.` marker
//! - Images emit `[Image: alt]` when they carry non-empty alt text, otherwise nothing

/// Elements whose body is never rendered.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "p", "pre",
    "section", "table", "tr",
];

/// Strips `html` to plain text. Empty or whitespace-only input yields `""`.
///
/// Never fails: unterminated tags are dropped and a `<` that does not start a
/// tag is kept as text.
pub fn normalize(html: &str) -> String {
    let mut out = TextBuilder::default();
    let mut lists: Vec<ListKind> = Vec::new();
    let mut rest = html;

    while let Some(pos) = rest.find('<') {
        out.push_text(&rest[..pos]);
        rest = &rest[pos..];

        match next_token(rest) {
            Token::Comment(len) | Token::Declaration(len) => rest = &rest[len..],
            Token::Tag(tag, len) => {
                rest = &rest[len..];
                if !tag.closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
                    rest = skip_raw_text(rest, &tag.name);
                    continue;
                }
                apply_tag(&tag, &mut out, &mut lists);
            }
            Token::Literal => {
                out.push_text("<");
                rest = &rest[1..];
            }
            Token::Unterminated => {
                rest = "";
            }
        }
    }
    out.push_text(rest);

    out.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tag semantics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum ListKind {
    Unordered,
    Ordered { next: u32 },
}

fn apply_tag(tag: &Tag<'_>, out: &mut TextBuilder, lists: &mut Vec<ListKind>) {
    let name = tag.name.as_str();
    match name {
        "br" => out.break_line(),
        "ul" | "ol" => {
            out.break_line();
            out.clear_marker();
            if tag.closing {
                lists.pop();
            } else if name == "ul" {
                lists.push(ListKind::Unordered);
            } else {
                lists.push(ListKind::Ordered { next: 1 });
            }
        }
        "li" => {
            out.break_line();
            if tag.closing {
                out.clear_marker();
            } else {
                let marker = match lists.last_mut() {
                    Some(ListKind::Ordered { next }) => {
                        let marker = format!("{next}.");
                        *next += 1;
                        marker
                    }
                    Some(ListKind::Unordered) | None => "•".to_string(),
                };
                out.set_marker(marker);
            }
        }
        "img" => {
            if let Some(alt) = tag.attribute("alt") {
                let alt = html_escape::decode_html_entities(alt);
                let alt = alt.trim();
                if !alt.is_empty() {
                    out.space();
                    out.push_plain(&format!("[Image: {alt}]"));
                    out.space();
                }
            }
        }
        "td" | "th" => out.space(),
        _ if BLOCK_ELEMENTS.contains(&name) => out.break_line(),
        _ => {}
    }
}

/// Skips everything up to and including `</name ...>`. Missing close tag drops the rest.
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> &'a str {
    let bytes = rest.as_bytes();
    let needle = format!("</{name}");
    let needle = needle.as_bytes();
    let mut search_from = 0;
    while let Some(found) = find_ignore_ascii_case(&bytes[search_from..], needle) {
        let after = search_from + found + needle.len();
        // `</scripts>` is not `</script>`.
        let boundary = bytes
            .get(after)
            .map_or(true, |b| *b == b'>' || *b == b'/' || b.is_ascii_whitespace());
        if boundary {
            return match bytes[after..].iter().position(|b| *b == b'>') {
                Some(end) => &rest[after + end + 1..],
                None => "",
            };
        }
        search_from = after;
    }
    ""
}

fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Tag<'a> {
    name: String,
    closing: bool,
    /// Raw attribute text between the name and the closing `>`.
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    /// Value of attribute `wanted`, unquoted. Attribute names match case-insensitively.
    fn attribute(&self, wanted: &str) -> Option<&'a str> {
        let bytes = self.attrs.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && bytes[i] != b'/'
            {
                i += 1;
            }
            let name = &self.attrs[name_start..i];
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let mut value = "";
            if i < bytes.len() && bytes[i] == b'=' {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                    let quote = bytes[i];
                    let value_start = i + 1;
                    i = value_start;
                    while i < bytes.len() && bytes[i] != quote {
                        i += 1;
                    }
                    value = &self.attrs[value_start..i];
                    i = (i + 1).min(bytes.len());
                } else {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    value = &self.attrs[value_start..i];
                }
            }

            if !name.is_empty() && name.eq_ignore_ascii_case(wanted) {
                return Some(value);
            }
            if name.is_empty() && i == name_start {
                // Stray `=` or quote; step over it.
                i += 1;
            }
        }
        None
    }
}

#[derive(Debug)]
enum Token<'a> {
    /// `<!-- ... -->`, with its byte length.
    Comment(usize),
    /// `<!DOCTYPE ...>` or `<?...>`, with its byte length.
    Declaration(usize),
    Tag(Tag<'a>, usize),
    /// A `<` that does not open markup.
    Literal,
    /// Markup that never closes before the end of input.
    Unterminated,
}

/// Classifies the markup at the start of `s`, which begins with `<`.
fn next_token(s: &str) -> Token<'_> {
    if let Some(body) = s.strip_prefix("<!--") {
        return match body.find("-->") {
            Some(end) => Token::Comment(4 + end + 3),
            None => Token::Unterminated,
        };
    }
    if s.starts_with("<!") || s.starts_with("<?") {
        return match s.find('>') {
            Some(end) => Token::Declaration(end + 1),
            None => Token::Unterminated,
        };
    }

    let (closing, name_start) = if s.starts_with("</") { (true, 2) } else { (false, 1) };
    let starts_name = s[name_start..]
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic());
    if !starts_name {
        return Token::Literal;
    }

    let Some(end) = find_tag_end(s) else {
        return Token::Unterminated;
    };
    let inner = &s[name_start..end];
    let name_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(inner.len());
    let attrs = inner[name_len..].trim_end_matches('/');

    Token::Tag(
        Tag {
            name: inner[..name_len].to_ascii_lowercase(),
            closing,
            attrs,
        },
        end + 1,
    )
}

/// Byte index of the `>` closing the tag at the start of `s`, skipping quoted values.
fn find_tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i),
            None => {}
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Output builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct TextBuilder {
    lines: Vec<String>,
    current: String,
    pending_space: bool,
    /// List marker written before the first visible character of the next line.
    marker: Option<String>,
}

impl TextBuilder {
    /// Appends raw text, decoding entities and collapsing whitespace.
    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = html_escape::decode_html_entities(raw);
        self.push_plain(&decoded);
    }

    /// Appends already-decoded text, collapsing whitespace.
    fn push_plain(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.current.is_empty() {
                if let Some(marker) = self.marker.take() {
                    self.current.push_str(&marker);
                    self.current.push(' ');
                }
            } else if self.pending_space {
                self.current.push(' ');
            }
            self.pending_space = false;
            self.current.push(c);
        }
    }

    fn set_marker(&mut self, marker: String) {
        self.marker = Some(marker);
    }

    fn clear_marker(&mut self) {
        self.marker = None;
    }

    fn space(&mut self) {
        self.pending_space = true;
    }

    fn break_line(&mut self) {
        let line = self.current.trim();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
        self.pending_space = false;
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
