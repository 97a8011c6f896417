//! wikicreole: streaming WikiCreole to XHTML converter
//!
//! The converter is a single-pass transducer. A lexer splits the source
//! into classified tokens and a table-driven state machine maps each
//! (state, token) pair to a list of rendering actions.
//!
//! # Design Principles
//! - No parse tree: tokens are rendered as they arrive
//! - No regex: byte-level scanning of ASCII markup
//! - Total transition table: every (token, state) pair has an entry
//! - Malformed markup degrades to escaped literal text
//!
//! # Example
//! ```
//! let html = wikicreole::to_xhtml("= Title =\n**bold** and //italic//").unwrap();
//! assert_eq!(
//!     html,
//!     "<h1>Title</h1>\n<p><strong>bold</strong> and <em>italic</em></p>\n"
//! );
//! ```

mod block;
mod convert;
pub mod cursor;
pub mod error;
pub mod escape;
mod inline;
pub mod lexer;
pub mod machine;
pub mod render;
pub mod resolve;
pub mod toc;
pub mod token;

// Re-export primary types
pub use block::list::ListKind;
pub use error::{Error, Result};
pub use inline::phrase::Phrase;
pub use render::XhtmlWriter;
pub use resolve::{
    Anchor, DefaultResolver, Image, ImageResolver, LinkResolver, PluginOutput, PluginResolver,
    Resolvers, Scope,
};
pub use toc::HeadingRecord;

/// Output flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Self-contained XHTML.
    #[default]
    Xhtml,
    /// XHTML with `{% ... %}` template tags for page links and plugins.
    Template,
}

/// Conversion options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: OutputMode,
    /// Prefix for page links that are not absolute URLs.
    pub link_base: String,
    /// Prefix for image targets that are not absolute URLs.
    pub asset_base: String,
    /// Add anchor ids to headings and prepend a table of contents.
    pub toc: bool,
    /// Minimum number of headings before the table of contents is emitted.
    pub toc_min_headings: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: OutputMode::Xhtml,
            link_base: "http://example.net/wiki/".to_string(),
            asset_base: "http://example.net/static/".to_string(),
            toc: false,
            toc_min_headings: 1,
        }
    }
}

/// Convert wiki markup to XHTML with default options.
///
/// # Example
/// ```
/// let html = wikicreole::to_xhtml("* one\n* two").unwrap();
/// assert_eq!(html, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
/// ```
pub fn to_xhtml(input: &str) -> Result<String> {
    convert(input, &Options::default(), &Resolvers::default())
}

/// Convert wiki markup with options and the default resolvers.
pub fn to_html_with_options(input: &str, options: &Options) -> Result<String> {
    convert(input, options, &Resolvers::default())
}

/// Convert wiki markup with options and custom resolvers.
///
/// Errors only signal a defect in the tokenizer or transition table;
/// malformed markup is rendered as text.
pub fn convert(input: &str, options: &Options, resolvers: &Resolvers<'_>) -> Result<String> {
    convert::run(input, options, resolvers, false)
}
