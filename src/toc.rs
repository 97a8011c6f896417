//! Heading anchors and the table of contents.

use sha2::{Digest, Sha256};

use crate::block::list::{ListKind, ListStack};
use crate::escape::{escape_text_into, escape_uri_into};
use crate::render::{Markup, XhtmlWriter};

const ID_DIGITS: u32 = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A heading that received an anchor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    pub level: usize,
    pub id: String,
    /// Heading text with tags removed, still escaped.
    pub text: String,
}

/// Anchor id for a heading: `h` followed by seven base-36 digits taken from
/// the SHA-256 digest of the heading text. Equal texts get equal ids on
/// every platform.
///
/// # Example
/// ```
/// use wikicreole::toc::anchor_id;
///
/// let id = anchor_id("Introduction");
/// assert_eq!(id.len(), 8);
/// assert_eq!(id, anchor_id("Introduction"));
/// ```
pub fn anchor_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let mut n = u64::from_be_bytes(prefix) % 36u64.pow(ID_DIGITS);

    let mut digits = [b'0'; ID_DIGITS as usize];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(n % 36) as usize];
        n /= 36;
    }
    let mut id = String::with_capacity(1 + digits.len());
    id.push('h');
    id.extend(digits.iter().map(|&d| d as char));
    id
}

/// Remove `<...>` tags that do not span a line break.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        let tail = &rest[open + 1..];
        match tail.find(['>', '\n']) {
            Some(close) if tail.as_bytes()[close] == b'>' => {
                out.push_str(&rest[..open]);
                rest = &tail[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render the table of contents as nested unordered lists.
pub fn render(headings: &[HeadingRecord]) -> String {
    let mut out = XhtmlWriter::with_capacity(headings.len() * 64 + 32);
    let mut lists = ListStack::new();
    out.markup("<div class=\"toc\">\n", Markup::Open);
    let mut link = String::new();
    for heading in headings {
        lists.insert(&mut out, ListKind::Unordered, heading.level);
        link.clear();
        link.push_str("<a href=\"");
        escape_uri_into(&mut link, &format!("#{}", heading.id));
        link.push_str("\">");
        escape_text_into(&mut link, &heading.text);
        link.push_str("</a>");
        out.raw(&link);
    }
    lists.close_all(&mut out);
    out.markup("</div>\n", Markup::Close);
    out.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: usize, id: &str, text: &str) -> HeadingRecord {
        HeadingRecord {
            level,
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_anchor_id_shape() {
        let id = anchor_id("Some heading");
        assert!(id.starts_with('h'));
        assert_eq!(id.len(), 8);
        assert!(id[1..].bytes().all(|b| BASE36.contains(&b)));
        assert_ne!(anchor_id("a"), anchor_id("b"));
    }

    #[test]
    fn test_anchor_id_fixed_values() {
        assert_eq!(anchor_id("Introduction"), "hsjtxjde");
        assert_eq!(anchor_id("Heading"), "hzhptslj");
        assert_eq!(anchor_id(""), "hheu33tg");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<h1>A <em>b</em></h1>"), "A b");
        assert_eq!(strip_tags("a &lt; b"), "a &lt; b");
        assert_eq!(strip_tags("x < y"), "x < y");
        assert_eq!(strip_tags("<a\nb>c"), "<a\nb>c");
    }

    #[test]
    fn test_render_nested() {
        let html = render(&[record(1, "h1", "One"), record(2, "h2", "Two &amp; more"), record(1, "h3", "Three")]);
        assert_eq!(
            html,
            "<div class=\"toc\">\n<ul>\n<li><a href=\"#h1\">One</a>\n\
             <ul>\n<li><a href=\"#h2\">Two &amp; more</a></li>\n</ul>\n</li>\n\
             <li><a href=\"#h3\">Three</a></li>\n</ul>\n</div>\n"
        );
    }
}
