//! Lazy tokenizer.
//!
//! The lexer tries a fixed list of alternatives at each position and takes
//! the first one that matches. Alternatives anchored to the start of a line
//! (verbatim fences, rules, list/cell/term/quote/heading markers) are only
//! tried there. Plain text runs until the next position where a higher
//! priority alternative could begin.
//!
//! The stream covers the input without gaps and always ends with a single
//! [`TokenKind::Eof`] token.

use std::ops::Range;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Unify line terminators to `\n` and end the text with exactly one newline.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    let mut rest = input;
    while let Some(cr) = memchr::memchr(b'\r', rest.as_bytes()) {
        out.push_str(&rest[..cr]);
        out.push('\n');
        let skip = if rest.as_bytes().get(cr + 1) == Some(&b'\n') { 2 } else { 1 };
        rest = &rest[cr + skip..];
    }
    out.push_str(rest);
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// A single alternative that matched.
struct Match {
    kind: TokenKind,
    end: usize,
    text: Range<usize>,
}

impl Match {
    /// A match whose payload is the whole lexeme.
    fn whole(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            end,
            text: start..end,
        }
    }
}

/// Tokenizer over normalized input.
///
/// # Example
/// ```
/// use wikicreole::lexer::Lexer;
/// use wikicreole::token::TokenKind;
///
/// let kinds: Vec<_> = Lexer::new("**bold**\n").map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::MaybeList, TokenKind::Text, TokenKind::MaybeList, TokenKind::Eol, TokenKind::Eof]
/// );
/// ```
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer. `src` should already be [`normalize`]d.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            finished: false,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn scan_at(&self, p: usize) -> Match {
        if p >= self.bytes.len() {
            return Match::whole(TokenKind::Eof, p, p);
        }
        if self.bytes[p] == b'\n' {
            return Match::whole(TokenKind::Eol, p, p + 1);
        }
        if Cursor::new_at(self.bytes, p).at_line_start() {
            if let Some(m) = self.line_start(p) {
                return m;
            }
        }
        self.heading_end(p)
            .or_else(|| self.maybe_list(p))
            .or_else(|| self.row_end(p))
            .or_else(|| self.cell(p))
            .or_else(|| self.description(p))
            .or_else(|| self.pair(p, TokenKind::Phrase, &[b"//", b"^^", b",,", b"__"]))
            .or_else(|| self.pair(p, TokenKind::Break, &[b"\\\\"]))
            .or_else(|| self.nowiki(p))
            .or_else(|| self.bracketed(p))
            .or_else(|| self.braced(p))
            .or_else(|| self.angled(p))
            .or_else(|| self.degenerate(p))
            .or_else(|| self.freestand(p))
            .or_else(|| self.escape(p))
            .or_else(|| self.blank(p))
            .unwrap_or_else(|| self.text(p))
    }

    /// Block openers that only count at the start of a line.
    fn line_start(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        if c.at_bytes(b"{{{\n") {
            if let Some(close) = Cursor::new_at(self.bytes, p + 4).find(b"\n}}}\n") {
                return Some(Match::whole(TokenKind::Verbatim, p, close + 5));
            }
        }

        c.skip_blanks();
        let q = c.offset();

        let mut rule = c;
        let dashes = rule.skip_run(b'-');
        if dashes >= 4 {
            rule.skip_blanks();
            if rule.at(b'\n') {
                return Some(Match {
                    kind: TokenKind::HorizontalRule,
                    end: rule.offset() + 1,
                    text: q..q + dashes,
                });
            }
        }

        match c.peek()? {
            marker @ (b'*' | b'#') => {
                let mut list = c;
                if list.skip_run(marker) == 2 {
                    return None;
                }
                list.skip_blanks();
                Some(Match {
                    kind: TokenKind::List,
                    end: list.offset(),
                    text: q..list.offset(),
                })
            }
            b'|' => {
                c.bump();
                c.eat(b'=');
                let r = c.offset();
                c.skip_blanks();
                Some(Match {
                    kind: TokenKind::Cell,
                    end: c.offset(),
                    text: q..r,
                })
            }
            b';' => Some(marker_run(c, TokenKind::Term, b';')),
            b'>' => Some(marker_run(c, TokenKind::Quote, b'>')),
            b'=' => Some(marker_run(c, TokenKind::Heading, b'=')),
            _ => None,
        }
    }

    /// `=` run followed by blanks and the end of the line. The payload keeps
    /// the leading blanks so it can be printed verbatim outside headings.
    fn heading_end(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        c.skip_blanks();
        if c.skip_run(b'=') == 0 {
            return None;
        }
        let r = c.offset();
        c.skip_blanks();
        c.at_line_end().then(|| Match {
            kind: TokenKind::Heading,
            end: c.offset(),
            text: p..r,
        })
    }

    fn maybe_list(&self, p: usize) -> Option<Match> {
        self.pair(p, TokenKind::MaybeList, &[b"**", b"##"])
    }

    fn row_end(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        c.skip_blanks();
        if !c.eat(b'|') {
            return None;
        }
        let r = c.offset();
        c.skip_blanks();
        c.at_line_end().then(|| Match {
            kind: TokenKind::RowEnd,
            end: c.offset(),
            text: p..r,
        })
    }

    fn cell(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        if !c.eat(b'|') {
            return None;
        }
        c.eat(b'=');
        c.skip_blanks();
        Some(Match::whole(TokenKind::Cell, p, c.offset()))
    }

    fn description(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        (c.skip_run(b':') > 0).then(|| Match::whole(TokenKind::Description, p, c.offset()))
    }

    fn pair(&self, p: usize, kind: TokenKind, marks: &[&[u8; 2]]) -> Option<Match> {
        let c = Cursor::new_at(self.bytes, p);
        marks
            .iter()
            .any(|m| c.at_bytes(*m))
            .then(|| Match::whole(kind, p, p + 2))
    }

    /// `{{{` ... `}}}`, extended over any further closing braces.
    fn nowiki(&self, p: usize) -> Option<Match> {
        if !Cursor::new_at(self.bytes, p).at_bytes(b"{{{") {
            return None;
        }
        let close = Cursor::new_at(self.bytes, p + 3).find(b"}}}")?;
        let mut c = Cursor::new_at(self.bytes, close);
        c.skip_run(b'}');
        Some(Match::whole(TokenKind::Nowiki, p, c.offset()))
    }

    fn bracketed(&self, p: usize) -> Option<Match> {
        if !Cursor::new_at(self.bytes, p).at_bytes(b"[[") {
            return None;
        }
        let close = Cursor::new_at(self.bytes, p + 2).find_in_line(b"]]")?;
        Some(Match::whole(TokenKind::Bracketed, p, close + 2))
    }

    fn braced(&self, p: usize) -> Option<Match> {
        let c = Cursor::new_at(self.bytes, p);
        if !c.at_bytes(b"{{") || c.peek_ahead(2) == Some(b'{') {
            return None;
        }
        let close = Cursor::new_at(self.bytes, p + 2).find_in_line(b"}}")?;
        Some(Match::whole(TokenKind::Braced, p, close + 2))
    }

    /// `<<< ... >>>` placeholders, otherwise `<< ... >>` plugin calls.
    fn angled(&self, p: usize) -> Option<Match> {
        let c = Cursor::new_at(self.bytes, p);
        if !c.at_bytes(b"<<") {
            return None;
        }
        if c.peek_ahead(2) == Some(b'<') {
            if let Some(close) = Cursor::new_at(self.bytes, p + 3).find(b">>>") {
                return Some(Match {
                    kind: TokenKind::Placeholder,
                    end: close + 3,
                    text: p + 3..close,
                });
            }
        }

        let mut body = Cursor::new_at(self.bytes, p + 2);
        body.skip_blanks();
        let q = body.offset();
        let close = body.find(b">>")?;
        let mut j = close;
        while j > q && matches!(self.bytes[j - 1], b' ' | b'\t') {
            j -= 1;
        }
        Some(Match {
            kind: TokenKind::Plugin,
            end: close + 2,
            text: q..j,
        })
    }

    /// Runs of `{`, `[` or `<` that did not open a construct.
    fn degenerate(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        let b = c.peek()?;
        if !matches!(b, b'{' | b'[' | b'<') {
            return None;
        }
        (c.skip_run(b) >= 2).then(|| Match::whole(TokenKind::Text, p, c.offset()))
    }

    fn freestand(&self, p: usize) -> Option<Match> {
        if p > 0 && is_word_byte(self.bytes[p - 1]) {
            return None;
        }
        let end = url_end(self.bytes, p)?;
        Some(Match::whole(TokenKind::Freestand, p, end))
    }

    fn escape(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        if !c.eat(b'~') {
            return None;
        }
        let q = c.offset();
        let end = match c.peek()? {
            b' ' | b'\t' | b'\r' | b'\n' => q,
            marker @ (b'*' | b'#' | b';' | b':' | b'=') => {
                c.skip_run(marker);
                c.offset()
            }
            _ => self.escaped_construct(q).unwrap_or_else(|| q + self.char_width(q)),
        };
        Some(Match::whole(TokenKind::Escape, p, end))
    }

    /// End of the construct following a `~`, if one is recognized.
    fn escaped_construct(&self, q: usize) -> Option<usize> {
        let c = Cursor::new_at(self.bytes, q);
        const PAIRS: [&[u8]; 5] = [b"//", b"\\\\", b"^^", b",,", b"__"];
        for pair in PAIRS {
            if c.at_bytes(pair) {
                return Some(q + 2);
            }
        }
        if c.at_bytes(b"[[") {
            if let Some(close) = Cursor::new_at(self.bytes, q + 2).find_in_line(b"]]") {
                return Some(close + 2);
            }
        }
        if c.at_bytes(b"{{") {
            if c.peek_ahead(2) == Some(b'{') {
                let mut run = c;
                run.skip_run(b'{');
                return Some(run.offset());
            }
            if let Some(close) = Cursor::new_at(self.bytes, q + 2).find_in_line(b"}}") {
                return Some(close + 2);
            }
        }
        let mut run = c;
        match run.peek() {
            Some(b'<') if run.skip_run(b'<') >= 2 => return Some(run.offset()),
            Some(b'-') if run.skip_run(b'-') >= 4 => return Some(run.offset()),
            _ => {}
        }
        url_end(self.bytes, q)
    }

    fn blank(&self, p: usize) -> Option<Match> {
        let mut c = Cursor::new_at(self.bytes, p);
        (c.skip_blanks() > 0).then(|| Match::whole(TokenKind::Blank, p, c.offset()))
    }

    /// Shortest non-empty run of text up to a point where another
    /// alternative could start.
    fn text(&self, p: usize) -> Match {
        let mut j = p + self.char_width(p);
        while j < self.bytes.len() && !self.text_stops_at(j) {
            j += self.char_width(j);
        }
        Match::whole(TokenKind::Text, p, j)
    }

    fn text_stops_at(&self, j: usize) -> bool {
        const MARKS: [&[u8]; 10] = [
            b"**", b"##", b"//", b"^^", b",,", b"__", b"\\\\", b"{{", b"[[", b"<<",
        ];
        let mut c = Cursor::new_at(self.bytes, j);
        c.skip_blanks();
        let k = c.offset();
        match c.peek() {
            None | Some(b'\n' | b'~' | b'|' | b':') => return true,
            _ => {}
        }
        let rest = c.remaining_slice();
        if MARKS.iter().any(|m| rest.starts_with(m)) {
            return true;
        }
        let mut heading = c;
        if heading.skip_run(b'=') > 0 {
            heading.skip_blanks();
            if heading.at_line_end() {
                return true;
            }
        }
        (k == 0 || !is_word_byte(self.bytes[k - 1]))
            && (rest.starts_with(b"http://")
                || rest.starts_with(b"https://")
                || rest.starts_with(b"ftp://"))
    }

    /// Width of the character starting at byte `i`.
    #[inline]
    fn char_width(&self, i: usize) -> usize {
        self.src
            .get(i..)
            .and_then(|s| s.chars().next())
            .map_or(1, char::len_utf8)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let src = self.src;
        let start = self.pos;
        let m = self.scan_at(start);
        if m.kind == TokenKind::Eof {
            self.finished = true;
        }
        self.pos = m.end;
        Some(Token::new(m.kind, &src[start..m.end], &src[m.text], start))
    }
}

/// Marker run at line start with its trailing blanks consumed.
fn marker_run(mut c: Cursor<'_>, kind: TokenKind, marker: u8) -> Match {
    let q = c.offset();
    c.skip_run(marker);
    let r = c.offset();
    c.skip_blanks();
    Match {
        kind,
        end: c.offset(),
        text: q..r,
    }
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_http_body(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-._~:/?#&+,;=".contains(&b)
}

fn is_http_final(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-_~/#&+=".contains(&b)
}

fn is_ftp_body(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-._/+".contains(&b)
}

fn is_ftp_final(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-_/+".contains(&b)
}

/// End of a URL starting at `p`, or `None` if there is none.
///
/// The URL is the longest run of at least two characters (a `%XX` escape
/// counts as one) whose last character may legally end a URL, so trailing
/// sentence punctuation stays outside.
fn url_end(bytes: &[u8], p: usize) -> Option<usize> {
    const SCHEMES: [(&[u8], bool); 4] = [
        (b"https://", true),
        (b"http://", true),
        (b"ftps://", false),
        (b"ftp://", false),
    ];
    let c = Cursor::new_at(bytes, p);
    let (scheme, http) = SCHEMES.into_iter().find(|(scheme, _)| c.at_bytes(scheme))?;

    let mut i = p + scheme.len();
    let mut units = 0;
    let mut end = None;
    while let Some(&b) = bytes.get(i) {
        let (width, is_final) = if http && b == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                break;
            }
            (3, true)
        } else if http && is_http_body(b) {
            (1, is_http_final(b))
        } else if !http && is_ftp_body(b) {
            (1, is_ftp_final(b))
        } else {
            break;
        };
        i += width;
        units += 1;
        if units >= 2 && is_final {
            end = Some(i);
        }
    }
    end
}
