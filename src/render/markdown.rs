//! Markdown renderer implementation.
//!
//! Produces one table row per body paragraph, keyed by an incrementing
//! `para_id` and tagged with the section header it falls under. Tables are
//! referenced from a row and written out after the row table.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Block, Document, ParagraphRecord};
use crate::numbering::{BulletExtractor, LabelledText};

use super::options::RenderOptions;
use super::table::render_table;

const COLUMNS_WITH_LABEL: &str = "| para_id | header | label | para_text |\n|---------|---------|-------|-----------|";
const COLUMNS_WITHOUT_LABEL: &str = "| para_id | header | para_text |\n|---------|---------|-----------|";

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRow {
    /// Sequential id, starting at [`RenderOptions::start_index`]
    pub para_id: u64,
    /// Header in effect when the row was emitted
    pub header: String,
    /// Reconstructed list label ("" outside lists)
    pub label: String,
    /// Display text, or a reference to an appended table
    pub para_text: String,
}

/// A rendered table referenced by a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAttachment {
    /// 1-based position among the body's tables, empty ones included
    pub index: usize,
    /// Markdown pipe table
    pub content: String,
}

/// Rows and tables gathered from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    /// Paragraph and table-reference rows in document order
    pub rows: Vec<ParagraphRow>,
    /// Tables referenced by the rows
    pub tables: Vec<TableAttachment>,
}

impl RowSet {
    /// Check if no row was produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Convert a Document to the Markdown row table.
///
/// Returns an empty string when the document yields no rows.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let rows = build_rows(doc, options);
    Ok(format_rows(&rows, options))
}

/// Walk the body once, labelling list paragraphs and tracking headers.
pub fn build_rows(doc: &Document, options: &RenderOptions) -> RowSet {
    let mut extractor = BulletExtractor::new(&doc.numbering);
    let mut out = RowSet::default();
    let mut next_id = options.start_index;
    let mut current_header = String::new();
    let mut table_counter = 0usize;

    let mut push_row = |out: &mut RowSet, header: &str, label: String, para_text: String| {
        out.rows.push(ParagraphRow {
            para_id: next_id,
            header: header.to_string(),
            label,
            para_text,
        });
        next_id = next_id.saturating_add(1);
    };

    for block in &doc.blocks {
        match block {
            Block::Paragraph(para) => {
                // Blank paragraphs leave the list state alone
                if para.is_empty() {
                    continue;
                }

                let labelled = extractor.label_paragraph(para);
                if is_header(para, &labelled, options) {
                    current_header = header_text(&labelled);
                    continue;
                }

                push_row(&mut out, &current_header, labelled.label, labelled.text);
            }
            Block::Table(table) => {
                table_counter += 1;
                let content = render_table(table);
                if content.is_empty() {
                    log::debug!("table {} has no header text, skipped", table_counter);
                    continue;
                }

                out.tables.push(TableAttachment {
                    index: table_counter,
                    content,
                });
                push_row(
                    &mut out,
                    &current_header,
                    String::new(),
                    format!("SEE TABLE_{} below", table_counter),
                );
            }
        }
    }

    log::debug!("built {} rows and {} tables", out.rows.len(), out.tables.len());
    out
}

/// Write gathered rows as Markdown.
pub fn format_rows(rows: &RowSet, options: &RenderOptions) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.rows.len() + 1);
    lines.push(if options.include_labels {
        COLUMNS_WITH_LABEL.to_string()
    } else {
        COLUMNS_WITHOUT_LABEL.to_string()
    });

    for row in &rows.rows {
        let line = if options.include_labels {
            format!(
                "| {} | {} | {} | {} |",
                row.para_id,
                escape_cell(&row.header),
                escape_cell(&row.label),
                escape_cell(&row.para_text)
            )
        } else {
            format!(
                "| {} | {} | {} |",
                row.para_id,
                escape_cell(&row.header),
                escape_cell(&row.para_text)
            )
        };
        lines.push(line);
    }

    let mut output = lines.join("\n");
    if !rows.tables.is_empty() {
        output.push_str("\n\n");
        for table in &rows.tables {
            output.push_str(&format!("\nTABLE_{}:\n{}\n", table.index, table.content));
        }
    }
    output
}

/// A paragraph opens a new section when it is not a nested list item and
/// either carries a heading style or is short. Words are counted on the text
/// as typed, before any numeral prefix is removed.
fn is_header(para: &ParagraphRecord, labelled: &LabelledText, options: &RenderOptions) -> bool {
    if !labelled.is_top_level() {
        return false;
    }
    para.style_name.to_lowercase().contains("heading")
        || para.word_count() <= options.max_header_words
}

fn header_text(labelled: &LabelledText) -> String {
    if labelled.label.is_empty() {
        labelled.text.clone()
    } else {
        format!("{} {}", labelled.label, labelled.text)
    }
}

/// Keep a value inside one Markdown table cell.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', "<br>")
}
