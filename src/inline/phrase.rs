//! Phrase markup (`**`, `//`, `##`, `^^`, `,,`, `__`).
//!
//! Phrases toggle: a marker opens its phrase when it is not open and closes
//! it when it is the innermost one. A marker for a phrase that is open
//! further out would cross the nesting, so it is printed as text.

use smallvec::SmallVec;

use crate::render::{Markup, XhtmlWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    Strong,
    Emphasis,
    Monospace,
    Superscript,
    Subscript,
    Underline,
}

impl Phrase {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "**" => Some(Self::Strong),
            "//" => Some(Self::Emphasis),
            "##" => Some(Self::Monospace),
            "^^" => Some(Self::Superscript),
            ",," => Some(Self::Subscript),
            "__" => Some(Self::Underline),
            _ => None,
        }
    }

    pub const fn open(self) -> &'static str {
        match self {
            Self::Strong => "<strong>",
            Self::Emphasis => "<em>",
            Self::Monospace => "<tt>",
            Self::Superscript => "<sup>",
            Self::Subscript => "<sub>",
            Self::Underline => "<span class=\"underline\">",
        }
    }

    pub const fn close(self) -> &'static str {
        match self {
            Self::Strong => "</strong>",
            Self::Emphasis => "</em>",
            Self::Monospace => "</tt>",
            Self::Superscript => "</sup>",
            Self::Subscript => "</sub>",
            Self::Underline => "</span>",
        }
    }
}

/// Open phrases, innermost last. Each phrase appears at most once.
#[derive(Debug, Default)]
pub(crate) struct PhraseStack {
    open: SmallVec<[Phrase; 6]>,
}

impl PhraseStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forget open phrases without closing them.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.open.clear();
    }

    /// Open or close `phrase`; `marker` is printed when neither applies.
    pub(crate) fn toggle(&mut self, out: &mut XhtmlWriter, phrase: Phrase, marker: &str) {
        if !self.open.contains(&phrase) {
            self.open.push(phrase);
            out.markup(phrase.open(), Markup::Open);
        } else if self.open.last() == Some(&phrase) {
            self.open.pop();
            out.markup(phrase.close(), Markup::Close);
        } else {
            out.text(marker);
        }
    }

    /// Close every open phrase, innermost first.
    pub(crate) fn flush(&mut self, out: &mut XhtmlWriter) {
        while let Some(phrase) = self.open.pop() {
            out.markup(phrase.close(), Markup::Close);
        }
    }
}
