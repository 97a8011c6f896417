//! Block-level state machine.
//!
//! The grammar is regular at the block level, so block context lives in a
//! small [`State`] enum while list depth and open phrases are tracked by the
//! converter. Each (token kind, state) pair maps to a [`Step`]: the ordered
//! actions to run and the state to continue in. The table is a fixed-size
//! array indexed by kind and state, so a missing entry is a compile error.

use crate::token::TokenKind;

/// Block context between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Outside any block.
    Block,
    /// Inside a paragraph, mid-line.
    Para,
    /// Inside a paragraph, at the start of a continuation line.
    ParaLine,
    Heading,
    /// Inside a list item, mid-line.
    List,
    /// Inside a list, at the start of a line.
    ListLine,
    /// Inside a table cell.
    Cell,
    /// After the closing `|` of a row.
    RowEnd,
    /// Inside a table, at the start of a line.
    TableLine,
    /// Inside an indented paragraph, mid-line.
    Indent,
    /// Inside an indented paragraph, at the start of a line.
    IndentLine,
    /// Inside a definition term, mid-line.
    Term,
    /// Inside a definition list, at the start of a line.
    TermLine,
}

impl State {
    pub const COUNT: usize = 13;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Work done by a transition, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EndHeading,
    EndIndent,
    EndList,
    EndParagraph,
    EndTable,
    InsertBreak,
    InsertImage,
    InsertLink,
    /// `:` after a term: turn the term into a description at the same level.
    InsertColon,
    InsertEscaped,
    InsertFreestand,
    InsertRule,
    InsertIndent,
    InsertList,
    InsertNowiki,
    InsertPhrase,
    InsertPlaceholder,
    InsertPlugin,
    InsertCell,
    InsertRow,
    InsertVerbatim,
    StartHeading,
    StartIndent,
    StartList,
    StartParagraph,
    StartTable,
    /// Emit the token payload as escaped text.
    Text,
    /// Collapse blanks and line ends into the pending separator.
    Blank,
}

/// A table entry. `next == None` ends the drive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: Option<State>,
    pub actions: &'static [Action],
}

macro_rules! go {
    ($next:ident $(, $action:ident)*) => {
        Step { next: Some(State::$next), actions: &[$(Action::$action),*] }
    };
}

macro_rules! halt {
    ($($action:ident),*) => {
        Step { next: None, actions: &[$(Action::$action),*] }
    };
}

/// Row shared by every inline construct: open a paragraph if needed, then
/// run the inline action in the current block.
macro_rules! inline_row {
    ($action:ident) => {
        [
            go!(Para, StartParagraph, $action),
            go!(Para, $action),
            go!(Para, $action),
            go!(Heading, $action),
            go!(List, $action),
            go!(List, $action),
            go!(Cell, $action),
            go!(Cell, $action),
            go!(Para, EndTable, StartParagraph, $action),
            go!(Indent, $action),
            go!(Indent, $action),
            go!(Term, $action),
            go!(Term, $action),
        ]
    };
}

/// Row for standalone blocks (verbatim, rule) that sit between other blocks.
macro_rules! block_row {
    ($action:ident) => {
        [
            go!(Block, $action),
            go!(Block),
            go!(Block, EndParagraph, $action),
            go!(Block),
            go!(Block),
            go!(Block, EndList, $action),
            go!(Block),
            go!(Block),
            go!(Block, EndTable, $action),
            go!(Block),
            go!(Block, EndParagraph, EndIndent, $action),
            go!(Block),
            go!(Block, EndList, $action),
        ]
    };
}

const TABLE: [[Step; State::COUNT]; TokenKind::COUNT] = [
    // Eof
    [
        halt!(),
        halt!(EndParagraph),
        halt!(EndParagraph),
        halt!(EndHeading),
        halt!(EndList),
        halt!(EndList),
        halt!(EndTable),
        halt!(EndTable),
        halt!(EndTable),
        halt!(EndParagraph, EndIndent),
        halt!(EndParagraph, EndIndent),
        halt!(EndList),
        halt!(EndList),
    ],
    // Eol
    [
        go!(Block),
        go!(ParaLine, Blank),
        go!(Block, EndParagraph),
        go!(Block, EndHeading),
        go!(ListLine, Blank),
        go!(Block, EndList),
        go!(TableLine),
        go!(TableLine),
        go!(Block, EndTable),
        go!(IndentLine, Blank),
        go!(Block, EndParagraph, EndIndent),
        go!(TermLine, Blank),
        go!(Block, EndList),
    ],
    // Verbatim
    block_row!(InsertVerbatim),
    // HorizontalRule
    block_row!(InsertRule),
    // Heading
    [
        go!(Heading, StartHeading),
        go!(Para, Text),
        go!(Heading, EndParagraph, StartHeading),
        go!(Block, EndHeading),
        go!(List, Text),
        go!(Heading, EndList, StartHeading),
        go!(Cell, Text),
        go!(Block),
        go!(Heading, EndTable, StartHeading),
        go!(Indent, Text),
        go!(Heading, EndParagraph, EndIndent, StartHeading),
        go!(Term, Text),
        go!(Heading, EndList, StartHeading),
    ],
    // List
    [
        go!(List, StartList),
        go!(Block),
        go!(List, EndParagraph, StartList),
        go!(Block),
        go!(Block),
        go!(List, InsertList),
        go!(Block),
        go!(Block),
        go!(List, EndTable, StartList),
        go!(Block),
        go!(List, EndParagraph, EndIndent, StartList),
        go!(Block),
        go!(List, InsertList),
    ],
    // MaybeList
    [
        go!(Para, StartParagraph, InsertPhrase),
        go!(Para, InsertPhrase),
        go!(Para, InsertPhrase),
        go!(Heading, InsertPhrase),
        go!(List, InsertPhrase),
        go!(List, InsertList),
        go!(Cell, InsertPhrase),
        go!(Block),
        go!(Para, EndTable, StartParagraph, InsertPhrase),
        go!(Indent, InsertPhrase),
        go!(Indent, InsertPhrase),
        go!(Term, InsertPhrase),
        go!(List, InsertList),
    ],
    // Cell
    [
        go!(Cell, StartTable),
        go!(Para, Text),
        go!(Cell, EndParagraph, StartTable),
        go!(Heading, Text),
        go!(List, Text),
        go!(Cell, EndList, StartTable),
        go!(Cell, InsertCell),
        go!(Block),
        go!(Cell, InsertRow),
        go!(Indent, Text),
        go!(Cell, EndParagraph, EndIndent, StartTable),
        go!(Term, Text),
        go!(Cell, EndList, StartTable),
    ],
    // RowEnd
    [
        go!(Block),
        go!(Para, Text),
        go!(Block),
        go!(Heading, Text),
        go!(List, Text),
        go!(Block),
        go!(RowEnd),
        go!(Block),
        go!(Block),
        go!(Indent, Text),
        go!(Block),
        go!(Term, Text),
        go!(Block),
    ],
    // Term
    [
        go!(Term, StartList),
        go!(Block),
        go!(Term, EndParagraph, StartList),
        go!(Block),
        go!(Block),
        go!(Term, InsertList),
        go!(Block),
        go!(Block),
        go!(Term, EndTable, StartList),
        go!(Block),
        go!(Term, EndParagraph, EndIndent, StartList),
        go!(Block),
        go!(Term, InsertList),
    ],
    // Description
    [
        go!(Indent, StartIndent, StartParagraph),
        go!(Para, Text),
        go!(Indent, EndParagraph, StartIndent, StartParagraph),
        go!(Heading, Text),
        go!(List, Text),
        go!(List, InsertList),
        go!(Cell, Text),
        go!(Block),
        go!(Indent, EndTable, StartIndent, StartParagraph),
        go!(Indent, Text),
        go!(Indent, EndParagraph, InsertIndent, StartParagraph),
        go!(List, InsertColon),
        go!(List, InsertList),
    ],
    // Quote
    [
        go!(Indent, StartIndent, StartParagraph),
        go!(Block),
        go!(Indent, EndParagraph, StartIndent, StartParagraph),
        go!(Block),
        go!(Block),
        go!(Indent, EndList, StartIndent, StartParagraph),
        go!(Block),
        go!(Block),
        go!(Indent, EndTable, StartIndent, StartParagraph),
        go!(Block),
        go!(Indent, EndParagraph, InsertIndent, StartParagraph),
        go!(Block),
        go!(Indent, EndList, StartIndent, StartParagraph),
    ],
    // Phrase
    inline_row!(InsertPhrase),
    // Break
    inline_row!(InsertBreak),
    // Nowiki
    inline_row!(InsertNowiki),
    // Bracketed
    inline_row!(InsertLink),
    // Braced
    inline_row!(InsertImage),
    // Placeholder
    inline_row!(InsertPlaceholder),
    // Plugin
    inline_row!(InsertPlugin),
    // Freestand
    inline_row!(InsertFreestand),
    // Escape
    inline_row!(InsertEscaped),
    // Blank
    [
        go!(Block),
        go!(Para, Blank),
        go!(ParaLine),
        go!(Heading, Blank),
        go!(List, Blank),
        go!(ListLine),
        go!(Cell, Blank),
        go!(Block),
        go!(TableLine),
        go!(Indent, Blank),
        go!(IndentLine),
        go!(Term, Blank),
        go!(TermLine),
    ],
    // Text
    inline_row!(Text),
];

/// Look up the transition for `kind` seen in `state`.
#[inline]
pub fn step(state: State, kind: TokenKind) -> Step {
    TABLE[kind.index()][state.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [State; State::COUNT] = [
        State::Block,
        State::Para,
        State::ParaLine,
        State::Heading,
        State::List,
        State::ListLine,
        State::Cell,
        State::RowEnd,
        State::TableLine,
        State::Indent,
        State::IndentLine,
        State::Term,
        State::TermLine,
    ];

    #[test]
    fn test_state_indices_are_dense() {
        for (i, state) in STATES.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
        assert_eq!(TokenKind::Text.index() + 1, TokenKind::COUNT);
    }

    #[test]
    fn test_only_eof_halts() {
        for state in STATES {
            assert_eq!(step(state, TokenKind::Eof).next, None);
            for kind in [TokenKind::Eol, TokenKind::Text, TokenKind::List, TokenKind::Blank] {
                assert!(step(state, kind).next.is_some());
            }
        }
    }

    #[test]
    fn test_list_in_table_closes_table_first() {
        let s = step(State::TableLine, TokenKind::List);
        assert_eq!(s.next, Some(State::List));
        assert_eq!(s.actions, &[Action::EndTable, Action::StartList]);
    }

    #[test]
    fn test_maybe_list_depends_on_state() {
        assert_eq!(step(State::ListLine, TokenKind::MaybeList).actions, &[Action::InsertList]);
        assert_eq!(
            step(State::Block, TokenKind::MaybeList).actions,
            &[Action::StartParagraph, Action::InsertPhrase]
        );
        // Leaves the line start, so a trailing ` |` is plain text.
        assert_eq!(step(State::IndentLine, TokenKind::MaybeList).next, Some(State::Indent));
    }

    #[test]
    fn test_table_row_flow() {
        assert_eq!(step(State::Cell, TokenKind::Cell).actions, &[Action::InsertCell]);
        assert_eq!(step(State::Cell, TokenKind::RowEnd).next, Some(State::RowEnd));
        assert_eq!(step(State::RowEnd, TokenKind::Eol).next, Some(State::TableLine));
        assert_eq!(step(State::TableLine, TokenKind::Cell).actions, &[Action::InsertRow]);
    }

    #[test]
    fn test_description_after_term() {
        let s = step(State::Term, TokenKind::Description);
        assert_eq!(s.next, Some(State::List));
        assert_eq!(s.actions, &[Action::InsertColon]);
    }
}
