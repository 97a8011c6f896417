//! Output buffer with lazy blank collapsing.
//!
//! Runs of blanks and line ends in the source collapse into a single
//! pending space. The space is written only when the next text follows
//! text or a closing tag, so markup never needs to look ahead.

use crate::escape;

/// What the writer emitted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    Nothing,
    Text,
    OpenTag,
    CloseTag,
}

/// Role of a markup fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Opening tag: the pending space is written before it.
    Open,
    /// Closing tag: the pending space is dropped.
    Close,
    /// Anything else, such as a list item switch: the pending space is dropped.
    Other,
}

/// XHTML output writer.
///
/// # Example
/// ```
/// use wikicreole::render::{Markup, XhtmlWriter};
///
/// let mut writer = XhtmlWriter::with_capacity_for(16);
/// writer.markup("<p>", Markup::Open);
/// writer.text("a");
/// writer.blank(" ");
/// writer.text("<b>");
/// writer.markup("</p>\n", Markup::Close);
/// assert_eq!(writer.into_string(), "<p>a &lt;b&gt;</p>\n");
/// ```
#[derive(Debug)]
pub struct XhtmlWriter {
    out: String,
    pending_space: bool,
    last: Emitted,
}

impl Default for XhtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XhtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create with capacity based on expected input size.
    ///
    /// Markup roughly doubles short inputs, so reserve extra.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self::with_capacity(input_len + input_len / 2 + 64)
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            pending_space: false,
            last: Emitted::Nothing,
        }
    }

    /// Write a markup fragment.
    pub fn markup(&mut self, fragment: &str, role: Markup) {
        if role != Markup::Open {
            self.pending_space = false;
        }
        self.flush_space();
        self.out.push_str(fragment);
        self.last = match role {
            Markup::Close => Emitted::CloseTag,
            Markup::Open | Markup::Other => Emitted::OpenTag,
        };
    }

    /// Write element content, escaped.
    pub fn text(&mut self, text: &str) {
        self.flush_space();
        escape::escape_text_into(&mut self.out, text);
        self.last = Emitted::Text;
    }

    /// Write code content, escaped without entity pass-through.
    pub fn code(&mut self, text: &str) {
        self.flush_space();
        escape::escape_code_into(&mut self.out, text);
        self.last = Emitted::Text;
    }

    /// Write already-formed output without escaping.
    pub fn raw(&mut self, text: &str) {
        self.flush_space();
        self.out.push_str(text);
        self.last = Emitted::Text;
    }

    /// Record a blank run (or line end) from the source.
    pub fn blank(&mut self, source: &str) {
        self.pending_space = false;
        if source.is_empty() {
            self.newline();
            return;
        }
        self.pending_space = match self.last {
            Emitted::Text => self.out.ends_with(|c: char| matches!(c, '!'..='~')),
            Emitted::CloseTag => true,
            Emitted::Nothing | Emitted::OpenTag => false,
        };
    }

    /// Write a soft line separator.
    pub fn newline(&mut self) {
        self.pending_space = false;
        self.out.push('\n');
        self.last = Emitted::Nothing;
    }

    /// What was emitted last.
    #[inline]
    pub fn last(&self) -> Emitted {
        self.last
    }

    /// Length of the output so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Output written since `offset`.
    #[inline]
    pub fn since(&self, offset: usize) -> &str {
        self.out.get(offset..).unwrap_or("")
    }

    /// Insert `fragment` at `offset`, which must be a char boundary.
    pub fn insert_at(&mut self, offset: usize, fragment: &str) {
        if self.out.is_char_boundary(offset) {
            self.out.insert_str(offset, fragment);
        }
    }

    /// Consume the writer and return the output.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    #[inline]
    fn flush_space(&mut self) {
        if self.pending_space {
            self.out.push(' ');
            self.pending_space = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_after_text() {
        let mut w = XhtmlWriter::new();
        w.text("a");
        w.blank("   ");
        w.text("b");
        assert_eq!(w.into_string(), "a b");
    }

    #[test]
    fn test_blank_dropped_after_open_tag() {
        let mut w = XhtmlWriter::new();
        w.markup("<p>", Markup::Open);
        w.blank(" ");
        w.text("a");
        assert_eq!(w.into_string(), "<p>a");
    }

    #[test]
    fn test_blank_kept_after_close_tag() {
        let mut w = XhtmlWriter::new();
        w.markup("<em>", Markup::Open);
        w.text("a");
        w.markup("</em>", Markup::Close);
        w.blank(" ");
        w.markup("<strong>", Markup::Open);
        assert_eq!(w.into_string(), "<em>a</em> <strong>");
    }

    #[test]
    fn test_blank_dropped_before_close_tag() {
        let mut w = XhtmlWriter::new();
        w.text("a");
        w.blank(" ");
        w.markup("</p>\n", Markup::Close);
        assert_eq!(w.into_string(), "a</p>\n");
    }

    #[test]
    fn test_blank_after_non_ascii_text_is_dropped() {
        let mut w = XhtmlWriter::new();
        w.text("日本");
        w.blank(" ");
        w.text("語");
        assert_eq!(w.into_string(), "日本語");
    }

    #[test]
    fn test_empty_blank_is_newline() {
        let mut w = XhtmlWriter::new();
        w.text("a");
        w.blank("");
        assert_eq!(w.last(), Emitted::Nothing);
        assert_eq!(w.into_string(), "a\n");
    }

    #[test]
    fn test_insert_at() {
        let mut w = XhtmlWriter::new();
        w.markup("<h1>", Markup::Open);
        w.insert_at(3, " id=\"x\"");
        assert_eq!(w.since(0), "<h1 id=\"x\">");
    }
}
