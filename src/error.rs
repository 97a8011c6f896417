//! Error types for conversion.
//!
//! Malformed markup is never an error: it degrades to literal text. The
//! variants below signal defects in the token stream or I/O failures in the
//! command line front end.

use thiserror::Error;

/// Errors that can abort a conversion.
#[derive(Debug, Error)]
pub enum Error {
    /// The tokenizer returned an empty token before end of input.
    #[error("tokenizer made no progress at byte offset {offset}")]
    Stalled { offset: usize },

    /// The token stream ran out without an end-of-input token.
    #[error("token stream ended at byte offset {offset} without end of input")]
    Unterminated { offset: usize },

    /// I/O failure while reading source text or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
