//! Drive loop: feeds tokens through the transition table and dispatches
//! the resulting actions.

use log::{debug, trace};

use crate::block::list::ListStack;
use crate::block::table::CellKind;
use crate::error::{Error, Result};
use crate::inline::phrase::PhraseStack;
use crate::lexer::{self, Lexer};
use crate::machine::{self, Action, State};
use crate::render::XhtmlWriter;
use crate::resolve::{Resolvers, Scope};
use crate::toc::{self, HeadingRecord};
use crate::token::{Token, TokenKind};
use crate::Options;

/// Heading being rendered: its level and where its opening tag starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenHeading {
    pub level: usize,
    pub start: usize,
}

/// Mutable state of one conversion.
pub(crate) struct Converter<'s, 'r> {
    pub scope: Scope<'s, 'r>,
    pub out: XhtmlWriter,
    pub phrases: PhraseStack,
    pub lists: ListStack,
    pub indent: usize,
    pub heading: Option<OpenHeading>,
    pub cell: CellKind,
    pub headings: Vec<HeadingRecord>,
}

/// Convert `source` in a fresh converter.
pub(crate) fn run(
    source: &str,
    options: &Options,
    resolvers: &Resolvers<'_>,
    expanding_plugin: bool,
) -> Result<String> {
    let src = lexer::normalize(source);
    let scope = Scope::new(options, resolvers, expanding_plugin);
    debug!(
        "converting {} bytes ({:?} mode, nested: {})",
        src.len(),
        options.mode,
        expanding_plugin
    );
    let mut converter = Converter::new(scope, src.len());
    converter.drive(&src)?;
    let headings = converter.headings.len();
    let html = converter.finish();
    debug!("produced {} bytes, {} headings", html.len(), headings);
    Ok(html)
}

impl<'s, 'r> Converter<'s, 'r> {
    fn new(scope: Scope<'s, 'r>, input_len: usize) -> Self {
        Self {
            scope,
            out: XhtmlWriter::with_capacity_for(input_len),
            phrases: PhraseStack::new(),
            lists: ListStack::new(),
            indent: 0,
            heading: None,
            cell: CellKind::default(),
            headings: Vec::new(),
        }
    }

    fn drive(&mut self, src: &str) -> Result<()> {
        let mut lexer = Lexer::new(src);
        let mut state = State::Block;
        loop {
            let Some(token) = lexer.next() else {
                return Err(Error::Unterminated {
                    offset: lexer.offset(),
                });
            };
            if token.lexeme.is_empty() && token.kind != TokenKind::Eof {
                return Err(Error::Stalled {
                    offset: token.offset,
                });
            }
            let step = machine::step(state, token.kind);
            trace!(
                "{:?} {:?} {:?} -> {:?} {:?}",
                state, token.kind, token.text, step.next, step.actions
            );
            for &action in step.actions {
                self.apply(action, &token);
            }
            match step.next {
                Some(next) => state = next,
                None => return Ok(()),
            }
        }
    }

    fn apply(&mut self, action: Action, token: &Token<'_>) {
        let data = token.text;
        match action {
            Action::EndHeading => self.end_heading(),
            Action::EndIndent => self.end_indent(),
            Action::EndList => self.end_list(),
            Action::EndParagraph => self.end_paragraph(),
            Action::EndTable => self.end_table(),
            Action::InsertBreak => self.insert_break(),
            Action::InsertImage => self.insert_image(data),
            Action::InsertLink => self.insert_link(data),
            Action::InsertColon => self.insert_colon(),
            Action::InsertEscaped => self.insert_escaped(data),
            Action::InsertFreestand => self.insert_freestand(data),
            Action::InsertRule => self.insert_rule(),
            Action::InsertIndent => self.insert_indent(data),
            Action::InsertList => self.insert_list(data),
            Action::InsertNowiki => self.insert_nowiki(data),
            Action::InsertPhrase => self.insert_phrase(data),
            Action::InsertPlaceholder => self.insert_placeholder(data),
            Action::InsertPlugin => self.insert_plugin(data),
            Action::InsertCell => self.insert_cell(data),
            Action::InsertRow => self.insert_row(data),
            Action::InsertVerbatim => self.insert_verbatim(data),
            Action::StartHeading => self.start_heading(data),
            Action::StartIndent => self.start_indent(data),
            Action::StartList => self.start_list(data),
            Action::StartParagraph => self.start_paragraph(),
            Action::StartTable => self.start_table(data),
            Action::Text => self.out.text(data),
            Action::Blank => self.out.blank(data),
        }
    }

    /// Final output, with the table of contents in front when enabled.
    fn finish(self) -> String {
        let options = self.scope.options();
        let body = self.out.into_string();
        let wants_toc = options.toc
            && !self.scope.expanding_plugin()
            && self.headings.len() >= options.toc_min_headings.max(1);
        if !wants_toc {
            return body;
        }
        debug!("prepending table of contents for {} headings", self.headings.len());
        let mut html = toc::render(&self.headings);
        html.push_str(&body);
        html
    }
}
