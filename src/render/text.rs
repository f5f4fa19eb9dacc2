//! Plain text renderer implementation.
//!
//! The fallback output: paragraph text without numbering or headers, followed
//! by the body's tables.

use crate::error::Result;
use crate::model::Document;

use super::table::render_table;

/// Convert a Document to plain text.
///
/// Non-empty body paragraphs are separated by blank lines. Every table with
/// content adds a `SEE TABLE_#{n} below` line and is appended at the end.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut parts: Vec<String> = doc
        .paragraphs()
        .map(|para| para.raw_text())
        .filter(|text| !text.is_empty())
        .collect();

    let mut tables = Vec::new();
    for (i, table) in doc.tables().enumerate() {
        let index = i + 1;
        let content = render_table(table);
        if !content.is_empty() {
            parts.push(format!("SEE TABLE_#{} below", index));
            tables.push((index, content));
        }
    }

    let mut output = parts.join("\n\n");
    if !tables.is_empty() {
        output.push_str("\n\n");
        for (index, content) in &tables {
            output.push_str(&format!("\nTABLE_#{}:\n{}\n", index, content));
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NumberRef, ParagraphRecord, Row, Table};

    #[test]
    fn test_paragraphs_only() {
        let mut doc = Document::new();
        doc.add_paragraph(ParagraphRecord::with_text("Title"));
        doc.add_paragraph(ParagraphRecord::new());
        doc.add_paragraph(ParagraphRecord::with_text("1. Body").numbered(NumberRef::new("1", 0)));

        assert_eq!(to_text(&doc).unwrap(), "Title\n\n1. Body");
    }

    #[test]
    fn test_tables_after_text() {
        let mut blank = Table::new();
        blank.add_row(Row::from_texts([" "]));
        let mut table = Table::new();
        table.add_row(Row::from_texts(["K"]));
        table.add_row(Row::from_texts(["v"]));

        let mut doc = Document::new();
        doc.add_table(blank);
        doc.add_paragraph(ParagraphRecord::with_text("Text"));
        doc.add_table(table);

        assert_eq!(
            to_text(&doc).unwrap(),
            "Text\n\nSEE TABLE_#2 below\n\n\nTABLE_#2:\n| K |\n| --- |\n| v |\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_text(&Document::new()).unwrap(), "");
    }
}
