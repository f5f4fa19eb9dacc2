//! Table model structures.

use super::ParagraphRecord;
use serde::{Deserialize, Serialize};

/// Content inside a table cell, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CellBlock {
    /// A paragraph of the cell
    Paragraph(ParagraphRecord),
    /// A table nested in the cell
    Table(Table),
}

/// A cell in a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Cell content
    #[serde(default)]
    pub content: Vec<CellBlock>,
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with a single paragraph of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![CellBlock::Paragraph(ParagraphRecord::with_text(text))],
        }
    }

    /// Add a paragraph.
    pub fn add_paragraph(&mut self, para: ParagraphRecord) {
        self.content.push(CellBlock::Paragraph(para));
    }

    /// Add a nested table.
    pub fn add_table(&mut self, table: Table) {
        self.content.push(CellBlock::Table(table));
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cells in this row
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row of single-paragraph cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::with_text).collect(),
        }
    }

    /// Add a cell to this row.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in this table
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to this table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_texts() {
        let row = Row::from_texts(["A", "B", "C"]);
        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_nested_table_in_cell() {
        let mut inner = Table::new();
        inner.add_row(Row::from_texts(["x"]));

        let mut cell = Cell::with_text("outer");
        cell.add_table(inner);

        assert_eq!(cell.content.len(), 2);
        assert!(matches!(cell.content[1], CellBlock::Table(_)));
    }

    #[test]
    fn test_table_creation() {
        let mut table = Table::new();
        assert!(table.is_empty());
        table.add_row(Row::from_texts(["Name", "Value"]));
        table.add_row(Row::from_texts(["foo", "bar"]));
        assert_eq!(table.row_count(), 2);
    }
}
