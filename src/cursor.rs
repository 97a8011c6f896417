//! Byte cursor used by the lexer.
//!
//! All the markup the lexer recognizes is ASCII, so scanning happens on
//! bytes. Offsets reported by the cursor always land on ASCII bytes or on
//! the end of input and are therefore valid `str` boundaries.

use memchr::{memchr, memmem};

/// A cursor over a byte slice, positioned at an absolute offset.
///
/// # Example
/// ```
/// use wikicreole::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"  ----\n");
/// cursor.skip_blanks();
/// assert_eq!(cursor.skip_run(b'-'), 4);
/// assert!(cursor.at_line_end());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor at `offset`.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self {
            input,
            pos: offset.min(input.len()),
        }
    }

    /// Current offset from the start of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at the byte `n` positions ahead.
    #[inline]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.pos + n).copied()
    }

    /// The byte before the cursor, if any.
    #[inline]
    pub fn peek_back(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|p| self.input[p])
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Check if the current byte equals `b`.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Check if the remaining input starts with `bytes`.
    #[inline]
    pub fn at_bytes(&self, bytes: &[u8]) -> bool {
        self.remaining_slice().starts_with(bytes)
    }

    /// True at end of input or on a newline.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n'))
    }

    /// True at offset 0 or right after a newline.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        matches!(self.peek_back(), None | Some(b'\n'))
    }

    /// Skip while predicate is true, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip spaces and tabs.
    #[inline]
    pub fn skip_blanks(&mut self) -> usize {
        self.skip_while(|b| b == b' ' || b == b'\t')
    }

    /// Skip a run of one repeated byte.
    #[inline]
    pub fn skip_run(&mut self, b: u8) -> usize {
        self.skip_while(|c| c == b)
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// The remaining bytes.
    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Absolute offset of the next occurrence of `needle`.
    #[inline]
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.remaining_slice(), needle).map(|i| self.pos + i)
    }

    /// Like [`find`](Self::find), but the match must end before the next
    /// line break.
    pub fn find_in_line(&self, needle: &[u8]) -> Option<usize> {
        let rest = self.remaining_slice();
        let line_end = memchr(b'\n', rest).unwrap_or(rest.len());
        let line = &rest[..line_end];
        let line = match memchr(b'\r', line) {
            Some(cr) => &line[..cr],
            None => line,
        };
        memmem::find(line, needle).map(|i| self.pos + i)
    }
}
