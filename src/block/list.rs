//! Nested lists: unordered, ordered and definition lists.
//!
//! Nesting is tracked on a stack of (level, kind) entries, where the level
//! is the length of the marker that opened the entry. A shallower marker
//! closes deeper entries; a marker between two open levels re-levels the
//! innermost entry instead of closing it.

use smallvec::SmallVec;

use crate::convert::Converter;
use crate::render::{Markup, XhtmlWriter};

/// Kind of list item, chosen by the marker character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `*`
    Unordered,
    /// `#`
    Ordered,
    /// `;`
    Term,
    /// `:`
    Description,
}

impl ListKind {
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'*' => Some(Self::Unordered),
            b'#' => Some(Self::Ordered),
            b';' => Some(Self::Term),
            b':' => Some(Self::Description),
            _ => None,
        }
    }

    /// Opens the container and its first item.
    pub const fn open(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>\n<li>",
            Self::Ordered => "<ol>\n<li>",
            Self::Term => "<dl>\n<dt>",
            Self::Description => "<dl>\n<dd>",
        }
    }

    /// Closes the current item and its container.
    pub const fn close(self) -> &'static str {
        match self {
            Self::Unordered => "</li>\n</ul>\n",
            Self::Ordered => "</li>\n</ol>\n",
            Self::Term => "</dt>\n</dl>\n",
            Self::Description => "</dd>\n</dl>\n",
        }
    }

    /// Closes an item of this kind and opens a sibling of kind `next`,
    /// switching containers when the two kinds do not share one.
    pub const fn switch(self, next: Self) -> &'static str {
        use ListKind::*;
        match (self, next) {
            (Unordered, Unordered) => "</li>\n<li>",
            (Unordered, Ordered) => "</li>\n</ul>\n<ol>\n<li>",
            (Unordered, Term) => "</li>\n</ul>\n<dl>\n<dt>",
            (Unordered, Description) => "</li>\n</ul>\n<dl>\n<dd>",
            (Ordered, Unordered) => "</li>\n</ol>\n<ul>\n<li>",
            (Ordered, Ordered) => "</li>\n<li>",
            (Ordered, Term) => "</li>\n</ol>\n<dl>\n<dt>",
            (Ordered, Description) => "</li>\n</ol>\n<dl>\n<dd>",
            (Term, Unordered) => "</dt>\n</dl>\n<ul>\n<li>",
            (Term, Ordered) => "</dt>\n</dl>\n<ol>\n<li>",
            (Term, Term) => "</dt>\n<dt>",
            (Term, Description) => "</dt>\n<dd>",
            (Description, Unordered) => "</dd>\n</dl>\n<ul>\n<li>",
            (Description, Ordered) => "</dd>\n</dl>\n<ol>\n<li>",
            (Description, Term) => "</dd>\n<dt>",
            (Description, Description) => "</dd>\n<dd>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    level: usize,
    kind: ListKind,
}

/// Open list entries, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ListStack {
    entries: SmallVec<[Entry; 8]>,
}

impl ListStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Level of the innermost entry.
    #[inline]
    pub(crate) fn top_level(&self) -> Option<usize> {
        self.entries.last().map(|e| e.level)
    }

    /// Start an item of `kind` at `level`.
    pub(crate) fn insert(&mut self, out: &mut XhtmlWriter, kind: ListKind, level: usize) {
        while let [.., parent, top] = self.entries.as_mut_slice() {
            if level >= top.level {
                break;
            }
            if parent.level < level {
                top.level = level;
                break;
            }
            if let Some(closed) = self.entries.pop() {
                out.markup(closed.kind.close(), Markup::Close);
            }
        }

        let entry = Entry { level, kind };
        match self.entries.last_mut() {
            None => {
                out.markup(kind.open(), Markup::Open);
                self.entries.push(entry);
            }
            Some(top) if top.level < level => {
                // A nested list inside a term moves on to its description.
                if top.kind == ListKind::Term
                    && matches!(kind, ListKind::Unordered | ListKind::Ordered)
                {
                    out.markup(ListKind::Term.switch(ListKind::Description), Markup::Other);
                    top.kind = ListKind::Description;
                }
                out.newline();
                out.markup(kind.open(), Markup::Open);
                self.entries.push(entry);
            }
            Some(top) => {
                out.markup(top.kind.switch(kind), Markup::Other);
                *top = entry;
            }
        }
    }

    /// Close every open entry.
    pub(crate) fn close_all(&mut self, out: &mut XhtmlWriter) {
        while let Some(closed) = self.entries.pop() {
            out.markup(closed.kind.close(), Markup::Close);
        }
    }
}

impl Converter<'_, '_> {
    pub(crate) fn start_list(&mut self, data: &str) {
        self.lists.clear();
        self.phrases.clear();
        self.insert_list(data);
    }

    /// `data` is a marker run such as `**`, `#` or `;;`.
    pub(crate) fn insert_list(&mut self, data: &str) {
        self.flush_phrases();
        let marker = data.trim_matches([' ', '\t']);
        let Some(kind) = marker.bytes().next().and_then(ListKind::from_marker) else {
            self.out.text(data);
            return;
        };
        self.lists.insert(&mut self.out, kind, marker.len());
        self.phrases.clear();
    }

    /// `:` after a term on the same line: a description at the term's level.
    pub(crate) fn insert_colon(&mut self) {
        self.flush_phrases();
        let level = self.lists.top_level().unwrap_or(1);
        self.lists.insert(&mut self.out, ListKind::Description, level);
        self.phrases.clear();
    }

    pub(crate) fn end_list(&mut self) {
        self.flush_phrases();
        self.lists.close_all(&mut self.out);
    }
}
