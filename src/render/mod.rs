//! Output rendering for documents.
//!
//! The main output is a Markdown table with one row per body paragraph:
//! a sequential `para_id`, the header the paragraph falls under, its
//! reconstructed list label and its text. Tables are appended after it.
//! A plain text rendering serves as fallback.
//!
//! # Example
//!
//! ```no_run
//! use paramd::{parse_file, render::*};
//!
//! let doc = parse_file("document.docx")?;
//!
//! // Render the row table
//! let md = to_markdown(&doc, &RenderOptions::default())?;
//!
//! // Render plain text
//! let text = to_text(&doc)?;
//!
//! // Render rows as JSON
//! let json = rows_to_json(&doc, &RenderOptions::default(), JsonFormat::Pretty)?;
//! # Ok::<(), paramd::Error>(())
//! ```

mod json;
mod markdown;
mod options;
mod table;
mod text;

pub use json::{rows_to_json, to_json, JsonFormat};
pub use markdown::{build_rows, format_rows, to_markdown, ParagraphRow, RowSet, TableAttachment};
pub use options::{RenderOptions, DEFAULT_MAX_HEADER_WORDS, DEFAULT_START_INDEX};
pub use table::{cell_text, render_table};
pub use text::to_text;
