//! JSON renderer implementation.

use crate::error::Result;
use crate::model::Document;

use super::markdown::build_rows;
use super::options::RenderOptions;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a Document model to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    Ok(match format {
        JsonFormat::Compact => serde_json::to_string(doc)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
    })
}

/// Convert the rows the Markdown renderer would write to JSON.
pub fn rows_to_json(doc: &Document, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    let rows = build_rows(doc, options);
    Ok(match format {
        JsonFormat::Compact => serde_json::to_string(&rows)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&rows)?,
    })
}
