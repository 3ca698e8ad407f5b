//! HTML to readable text conversion.
//!
//! [`TextExtractor`] strips a page down to link-free, markdown-ish plain
//! text: headings become `#` markers, list items become bullets, horizontal
//! rules become `* * *`, anchor text is kept without its URL, and script,
//! style, and head content is dropped. Extraction rules then slice this
//! text with marker patterns.

use scraper::node::Node;
use scraper::Html;

/// Converts raw HTML into readable plain text.
///
/// Pure and deterministic: the same body always yields the same text, and
/// malformed HTML degrades to best-effort output rather than an error (the
/// html5ever parser is total).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders an HTML body as link-free readable text.
    #[must_use]
    pub fn to_readable_text(&self, html_body: &str) -> String {
        let document = Html::parse_document(html_body);
        let mut out = String::new();
        render_children(document.tree.root(), &mut out);
        tidy(&out)
    }
}

fn render_children(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        render_node(child, out);
    }
}

fn render_node(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_inline_text(text, out),
        Node::Element(element) => {
            let name = element.name();
            match name {
                // Invisible content.
                "script" | "style" | "noscript" | "template" | "head" | "iframe" => {}
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    let level = usize::from(name.as_bytes()[1] - b'0');
                    break_block(out);
                    out.push_str(&"#".repeat(level));
                    out.push(' ');
                    render_children(node, out);
                    break_block(out);
                }
                "p" | "div" | "section" | "article" | "main" | "header" | "footer"
                | "aside" | "nav" | "blockquote" | "figure" | "figcaption" | "table"
                | "ul" | "ol" => {
                    break_block(out);
                    render_children(node, out);
                    break_block(out);
                }
                "li" => {
                    break_line(out);
                    out.push_str("* ");
                    render_children(node, out);
                    break_line(out);
                }
                "br" => break_line(out),
                "hr" => {
                    break_block(out);
                    out.push_str("* * *");
                    break_block(out);
                }
                "tr" => {
                    break_line(out);
                    render_children(node, out);
                    break_line(out);
                }
                "strong" | "b" => {
                    out.push_str("**");
                    render_children(node, out);
                    out.push_str("**");
                }
                "em" | "i" => {
                    out.push('_');
                    render_children(node, out);
                    out.push('_');
                }
                "code" => {
                    out.push('`');
                    render_children(node, out);
                    out.push('`');
                }
                "pre" => {
                    break_block(out);
                    render_children(node, out);
                    break_block(out);
                }
                // Links keep their text, never their URL.
                "a" => render_children(node, out),
                // Images carry no extractable text.
                "img" | "svg" | "picture" | "video" | "audio" => {}
                _ => render_children(node, out),
            }
        }
        _ => render_children(node, out),
    }
}

/// Appends text with internal whitespace runs collapsed to single spaces.
fn push_inline_text(text: &str, out: &mut String) {
    if text.trim().is_empty() {
        return;
    }
    let starts_with_space = text.starts_with(char::is_whitespace);
    if starts_with_space && !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    let mut first = true;
    for word in text.split_whitespace() {
        if !first {
            out.push(' ');
        }
        out.push_str(word);
        first = false;
    }
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn break_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn break_block(out: &mut String) {
    break_line(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

/// Trims trailing spaces per line and collapses runs of blank lines.
fn tidy(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0_usize;
    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
