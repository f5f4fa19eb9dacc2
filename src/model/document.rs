//! Document model structures.

use super::{ParagraphRecord, Table};
use crate::numbering::NumberingCatalog;
use serde::{Deserialize, Serialize};

/// A body-level content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A paragraph of text
    Paragraph(ParagraphRecord),
    /// A table
    Table(Table),
}

/// A parsed word-processing document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Body blocks in document order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Numbering definitions the paragraphs refer to
    #[serde(skip)]
    pub numbering: NumberingCatalog,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a numbering catalog.
    pub fn with_numbering(numbering: NumberingCatalog) -> Self {
        Self {
            blocks: Vec::new(),
            numbering,
        }
    }

    /// Add a content block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a paragraph.
    pub fn add_paragraph(&mut self, para: ParagraphRecord) {
        self.blocks.push(Block::Paragraph(para));
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Body paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphRecord> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(para) => Some(para),
            Block::Table(_) => None,
        })
    }

    /// Body tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        })
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
