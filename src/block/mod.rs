//! Block-level actions.
//!
//! Handles:
//! - Paragraphs
//! - Headings (with anchor ids when a table of contents is requested)
//! - Horizontal rules
//! - Verbatim blocks
//! - Indented paragraphs
//!
//! Lists and tables live in their own modules.

pub(crate) mod list;
pub(crate) mod table;

use crate::convert::{Converter, OpenHeading};
use crate::render::Markup;
use crate::toc::{self, HeadingRecord};

const HEADING_OPEN: [&str; 6] = ["<h1>", "<h2>", "<h3>", "<h4>", "<h5>", "<h6>"];
const HEADING_CLOSE: [&str; 6] = ["</h1>\n", "</h2>\n", "</h3>\n", "</h4>\n", "</h5>\n", "</h6>\n"];

const INDENT_OPEN: &str = "<div style=\"margin-left:2em\">\n";
const INDENT_CLOSE: &str = "</div>\n";

impl Converter<'_, '_> {
    /// Open a block. Phrases from the previous block were already closed.
    pub(crate) fn start_block(&mut self, open: &str) {
        self.out.markup(open, Markup::Open);
        self.phrases.clear();
    }

    /// Close open phrases, then the block.
    pub(crate) fn end_block(&mut self, close: &str) {
        self.flush_phrases();
        self.out.markup(close, Markup::Close);
    }

    pub(crate) fn start_paragraph(&mut self) {
        self.start_block("<p>");
    }

    pub(crate) fn end_paragraph(&mut self) {
        self.end_block("</p>\n");
    }

    /// `data` is the run of `=` that opened the heading.
    pub(crate) fn start_heading(&mut self, data: &str) {
        let level = data.bytes().filter(|&b| b == b'=').count().clamp(1, 6);
        self.heading = Some(OpenHeading {
            level,
            start: self.out.len(),
        });
        self.start_block(HEADING_OPEN[level - 1]);
    }

    pub(crate) fn end_heading(&mut self) {
        let Some(OpenHeading { level, start }) = self.heading.take() else {
            return;
        };
        self.end_block(HEADING_CLOSE[level - 1]);
        if !self.scope.options().toc {
            return;
        }

        let rendered = self.out.since(start);
        let Some(tag) = rendered.find("<h") else {
            return;
        };
        let text = toc::strip_tags(rendered.trim_end_matches('\n'));
        if text.is_empty() {
            return;
        }
        let id = toc::anchor_id(&text);
        self.out.insert_at(start + tag + 3, &format!(" id=\"{id}\""));
        self.headings.push(HeadingRecord { level, id, text });
    }

    pub(crate) fn insert_rule(&mut self) {
        self.out.markup("<hr />\n", Markup::Other);
    }

    /// `data` is the whole block, fences included.
    pub(crate) fn insert_verbatim(&mut self, data: &str) {
        let body = data
            .strip_prefix("{{{\n")
            .and_then(|rest| rest.strip_suffix("\n}}}\n"))
            .unwrap_or(data)
            .trim_end_matches([' ', '\t']);

        // A fence inside the block is written with one leading space.
        let mut content = String::with_capacity(body.len());
        for (i, line) in body.split('\n').enumerate() {
            if i > 0 {
                content.push('\n');
            }
            let line = match line.strip_prefix(' ') {
                Some(rest) if rest.starts_with("}}}") => rest,
                _ => line,
            };
            content.push_str(line);
        }

        self.out.markup("<pre>", Markup::Open);
        self.out.code(&content);
        self.out.markup("</pre>\n", Markup::Close);
    }

    pub(crate) fn start_indent(&mut self, data: &str) {
        self.indent = 0;
        self.insert_indent(data);
    }

    /// Move to the depth given by the marker length.
    pub(crate) fn insert_indent(&mut self, data: &str) {
        let level = data.bytes().filter(|b| !matches!(b, b' ' | b'\t')).count();
        for _ in self.indent..level {
            self.out.markup(INDENT_OPEN, Markup::Open);
        }
        for _ in level..self.indent {
            self.out.markup(INDENT_CLOSE, Markup::Close);
        }
        self.indent = level;
    }

    pub(crate) fn end_indent(&mut self) {
        self.insert_indent("");
    }
}

#[cfg(test)]
mod tests {
    use crate::{to_html_with_options, to_xhtml, Options};

    fn html(input: &str) -> String {
        to_xhtml(input).unwrap()
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(html("a\nb\n\nc"), "<p>a b</p>\n<p>c</p>\n");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(html("== Two =="), "<h2>Two</h2>\n");
        assert_eq!(html("======= Deep"), "<h6>Deep</h6>\n");
    }

    #[test]
    fn test_rule() {
        assert_eq!(html("a\n----\nb"), "<p>a</p>\n<hr />\n<p>b</p>\n");
    }

    #[test]
    fn test_verbatim_fence_unescape() {
        assert_eq!(
            html("{{{\n  a <b>\n }}}\n}}}\n"),
            "<pre>  a &lt;b&gt;\n&#125;&#125;&#125;</pre>\n"
        );
    }

    #[test]
    fn test_indent_steps() {
        assert_eq!(
            html(":a\n::b\n:c"),
            "<div style=\"margin-left:2em\">\n<p>a</p>\n\
             <div style=\"margin-left:2em\">\n<p>b</p>\n\
             </div>\n<p>c</p>\n</div>\n"
        );
    }

    #[test]
    fn test_heading_ids_only_with_toc() {
        let options = Options {
            toc: true,
            toc_min_headings: 5,
            ..Options::default()
        };
        let out = to_html_with_options("= A =", &options).unwrap();
        assert!(out.starts_with("<h1 id=\"h"));
        assert!(out.ends_with("\">A</h1>\n"));
        assert_eq!(html("= A ="), "<h1>A</h1>\n");
    }
}
