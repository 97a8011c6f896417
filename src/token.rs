//! Token kinds produced by the lexer.

/// Classification of a lexeme.
///
/// Several lexical forms share a kind because the state machine treats them
/// identically; they differ only in the payload they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input, matched once at the final position.
    Eof,
    /// A line break.
    Eol,
    /// `{{{` block at line start, closed by a `}}}` line.
    Verbatim,
    /// Four or more dashes on a line of their own.
    HorizontalRule,
    /// `=` run opening a heading, or a trailing `=` run closing one.
    Heading,
    /// Unambiguous list marker at line start: one or three and more `*`/`#`.
    List,
    /// `**` or `##`: a list marker or a phrase marker depending on state.
    MaybeList,
    /// `|` or `|=` cell marker.
    Cell,
    /// `|` followed only by blanks up to the end of the line.
    RowEnd,
    /// `;` run at line start.
    Term,
    /// `:` run.
    Description,
    /// `>` run at line start.
    Quote,
    /// `//`, `^^`, `,,` or `__`.
    Phrase,
    /// Forced line break `\\`.
    Break,
    /// Inline `{{{ ... }}}`.
    Nowiki,
    /// `[[ ... ]]` link.
    Bracketed,
    /// `{{ ... }}` image.
    Braced,
    /// `<<< ... >>>` literal placeholder.
    Placeholder,
    /// `<< ... >>` plugin call.
    Plugin,
    /// Bare `http://`, `https://`, `ftp://` or `ftps://` URL.
    Freestand,
    /// `~` escape.
    Escape,
    /// Run of spaces and tabs.
    Blank,
    /// Plain text, including degenerate bracket and brace runs.
    Text,
}

impl TokenKind {
    /// Number of token kinds. Rows of the transition table are indexed by kind.
    pub const COUNT: usize = 23;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A lexeme and the payload the actions consume.
///
/// `lexeme` is the exact source span; concatenating the lexemes of a token
/// stream reproduces the normalized input. `text` is the part the actions
/// care about, e.g. the `===` of a heading without its surrounding blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub text: &'a str,
    /// Byte offset of `lexeme` in the normalized input.
    pub offset: usize,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'a str, text: &'a str, offset: usize) -> Self {
        Self {
            kind,
            lexeme,
            text,
            offset,
        }
    }
}
