//! Document model produced by the DOCX parser.
//!
//! The parser turns WordprocessingML into these records; the numbering engine
//! and the Markdown renderer only ever see this model.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
