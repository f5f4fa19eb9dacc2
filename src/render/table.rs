//! Markdown rendering of tables.

use crate::model::{Cell, CellBlock, Row, Table};

/// Separator cell written once per column under the header row.
const SEPARATOR_CELL: &str = " --- |";

/// Render a table to a Markdown pipe table.
///
/// The first row is the header. A table whose header row shows no text
/// renders as an empty string, as does a table with no rows; later rows are
/// only written when at least one of their cells has text.
pub fn render_table(table: &Table) -> String {
    let Some((header, body)) = table.rows.split_first() else {
        return String::new();
    };

    let header_cells = row_texts(header);
    if header_cells.iter().all(|text| text.trim().is_empty()) {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(pipe_row(&header_cells));
    lines.push(format!("|{}", SEPARATOR_CELL.repeat(header_cells.len())));

    for row in body {
        let cells = row_texts(row);
        if cells.iter().any(|text| !text.trim().is_empty()) {
            lines.push(pipe_row(&cells));
        }
    }

    lines.join("\n")
}

/// Text of a cell: its non-empty paragraphs joined by a space, with nested
/// tables rendered in place on their own lines.
pub fn cell_text(cell: &Cell) -> String {
    let mut parts = Vec::new();

    for block in &cell.content {
        match block {
            CellBlock::Paragraph(para) => {
                let text = para.raw_text();
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            CellBlock::Table(nested) => {
                let md = render_table(nested);
                if !md.is_empty() {
                    parts.push(format!("\n{}\n", md));
                }
            }
        }
    }

    parts.join(" ").trim().to_string()
}

fn row_texts(row: &Row) -> Vec<String> {
    row.cells.iter().map(cell_text).collect()
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphRecord;

    #[test]
    fn test_simple_table() {
        let mut table = Table::new();
        table.add_row(Row::from_texts(["Name", "Value"]));
        table.add_row(Row::from_texts(["foo", "1"]));
        table.add_row(Row::from_texts(["bar", "2"]));

        assert_eq!(
            render_table(&table),
            "| Name | Value |\n| --- | --- |\n| foo | 1 |\n| bar | 2 |"
        );
    }

    #[test]
    fn test_empty_header_row_drops_table() {
        let mut table = Table::new();
        table.add_row(Row::from_texts(["", "  "]));
        table.add_row(Row::from_texts(["data", "more"]));

        assert_eq!(render_table(&table), "");
        assert_eq!(render_table(&Table::new()), "");
    }

    #[test]
    fn test_blank_data_rows_skipped() {
        let mut table = Table::new();
        table.add_row(Row::from_texts(["H"]));
        table.add_row(Row::from_texts([""]));
        table.add_row(Row::from_texts(["x"]));

        assert_eq!(render_table(&table), "| H |\n| --- |\n| x |");
    }

    #[test]
    fn test_header_only_table() {
        let mut table = Table::new();
        table.add_row(Row::from_texts(["Only", "Header"]));

        assert_eq!(render_table(&table), "| Only | Header |\n| --- | --- |");
    }

    #[test]
    fn test_cell_with_multiple_paragraphs() {
        let mut cell = Cell::new();
        cell.add_paragraph(ParagraphRecord::with_text("First"));
        cell.add_paragraph(ParagraphRecord::new());
        cell.add_paragraph(ParagraphRecord::with_text(" Second "));

        assert_eq!(cell_text(&cell), "First Second");
    }

    #[test]
    fn test_nested_table_embedded() {
        let mut inner = Table::new();
        inner.add_row(Row::from_texts(["i"]));

        let mut cell = Cell::with_text("outer");
        cell.add_table(inner);

        assert_eq!(cell_text(&cell), "outer \n| i |\n| --- |");
    }

    #[test]
    fn test_empty_nested_table_ignored() {
        let mut inner = Table::new();
        inner.add_row(Row::from_texts([""]));

        let mut cell = Cell::with_text("only text");
        cell.add_table(inner);

        assert_eq!(cell_text(&cell), "only text");
    }
}
