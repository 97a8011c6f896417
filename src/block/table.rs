//! Tables: rows of `|` and `|=` cells.

use crate::convert::Converter;
use crate::render::Markup;

/// Data (`|`) or header (`|=`) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum CellKind {
    #[default]
    Data,
    Header,
}

impl CellKind {
    fn from_marker(data: &str) -> Self {
        if data.starts_with("|=") {
            Self::Header
        } else {
            Self::Data
        }
    }

    const fn open(self) -> &'static str {
        match self {
            Self::Data => "<td>",
            Self::Header => "<th>",
        }
    }

    const fn close(self) -> &'static str {
        match self {
            Self::Data => "</td>",
            Self::Header => "</th>",
        }
    }
}

impl Converter<'_, '_> {
    pub(crate) fn start_table(&mut self, data: &str) {
        self.out.markup("<table>\n<tr>", Markup::Open);
        self.open_cell(data);
    }

    /// First cell of a new row.
    pub(crate) fn insert_row(&mut self, data: &str) {
        self.close_cell();
        self.out.markup("</tr>\n<tr>", Markup::Other);
        self.open_cell(data);
    }

    pub(crate) fn insert_cell(&mut self, data: &str) {
        self.close_cell();
        self.open_cell(data);
    }

    pub(crate) fn end_table(&mut self) {
        self.close_cell();
        self.out.markup("</tr>\n</table>\n", Markup::Close);
    }

    fn open_cell(&mut self, data: &str) {
        self.cell = CellKind::from_marker(data);
        self.start_block(self.cell.open());
    }

    fn close_cell(&mut self) {
        self.end_block(self.cell.close());
    }
}

#[cfg(test)]
mod tests {
    use crate::to_xhtml;

    #[test]
    fn test_header_and_data_rows() {
        assert_eq!(
            to_xhtml("|= a |= b |\n| 1 | 2 |").unwrap(),
            "<table>\n<tr><th>a</th><th>b</th></tr>\n<tr><td>1</td><td>2</td></tr>\n</table>\n"
        );
    }

    #[test]
    fn test_phrases_close_at_cell_boundary() {
        assert_eq!(
            to_xhtml("|**a|b|").unwrap(),
            "<table>\n<tr><td><strong>a</strong></td><td>b</td></tr>\n</table>\n"
        );
    }

    #[test]
    fn test_text_after_table_starts_paragraph() {
        assert_eq!(
            to_xhtml("|a|\nb").unwrap(),
            "<table>\n<tr><td>a</td></tr>\n</table>\n<p>b</p>\n"
        );
    }
}
