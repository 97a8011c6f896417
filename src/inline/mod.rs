//! Inline actions: phrases, breaks, escapes and literal spans.
//!
//! Links, images and plugin calls are in [`links`].

pub(crate) mod links;
pub(crate) mod phrase;

use crate::convert::Converter;
use crate::render::Markup;
use phrase::Phrase;

impl Converter<'_, '_> {
    pub(crate) fn insert_phrase(&mut self, data: &str) {
        match Phrase::from_marker(data) {
            Some(phrase) => self.phrases.toggle(&mut self.out, phrase, data),
            None => self.out.text(data),
        }
    }

    #[inline]
    pub(crate) fn flush_phrases(&mut self) {
        self.phrases.flush(&mut self.out);
    }

    pub(crate) fn insert_break(&mut self) {
        self.out.markup("<br />\n", Markup::Other);
    }

    /// `~x` prints `x` literally; a lone `~` prints itself.
    pub(crate) fn insert_escaped(&mut self, data: &str) {
        match data.strip_prefix('~') {
            Some(rest) if !rest.is_empty() => self.out.text(rest),
            _ => self.out.text("~"),
        }
    }

    /// Inline `{{{ ... }}}`, rendered as code.
    pub(crate) fn insert_nowiki(&mut self, data: &str) {
        let body = data
            .strip_prefix("{{{")
            .and_then(|rest| rest.strip_suffix("}}}"))
            .unwrap_or("")
            .trim_matches([' ', '\t']);
        self.out.markup("<code>", Markup::Open);
        self.out.code(body);
        self.out.markup("</code>", Markup::Close);
    }

    /// `<<< ... >>>`: escaped literal text without a wrapping element.
    pub(crate) fn insert_placeholder(&mut self, data: &str) {
        self.out.markup("", Markup::Open);
        self.out.code(data.trim_matches([' ', '\r', '\n']));
        self.out.markup("", Markup::Close);
    }
}
