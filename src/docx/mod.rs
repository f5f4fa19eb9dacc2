//! DOCX (Word) document parser.
//!
//! Reads the body of a `.docx` package into a [`Document`](crate::model::Document):
//! paragraphs with their style names and numbering references, and tables
//! with nested content.

mod parser;
mod recover;
mod styles;

pub use parser::DocxParser;
pub use styles::{NumberingProps, Style, StyleMap};
