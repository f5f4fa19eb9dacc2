//! Paragraph records and inline content.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Deepest list level a numbering definition can describe (levels are 0-8).
pub const MAX_LEVEL: u8 = 8;

/// Inline content of a paragraph.
///
/// Every kind of node a paragraph can contain is listed here, so adding one
/// forces each consumer to decide how it is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum InlineNode {
    /// Plain run text (`w:r`)
    Run(String),
    /// Display text of a hyperlink; the target is not kept
    Hyperlink(String),
    /// Tracked insertion (`w:ins`), shown
    Insertion(String),
    /// Tracked deletion (`w:del`), hidden
    Deletion(String),
}

impl InlineNode {
    /// Text this node contributes to the visible paragraph, if any.
    pub fn visible_text(&self) -> Option<&str> {
        match self {
            InlineNode::Run(text) | InlineNode::Hyperlink(text) | InlineNode::Insertion(text) => {
                Some(text)
            }
            InlineNode::Deletion(_) => None,
        }
    }

    /// Append text to this node.
    pub fn push_str(&mut self, s: &str) {
        match self {
            InlineNode::Run(text)
            | InlineNode::Hyperlink(text)
            | InlineNode::Insertion(text)
            | InlineNode::Deletion(text) => text.push_str(s),
        }
    }
}

/// Numbering reference of a paragraph (`w:numPr`).
///
/// A missing `definition_id` means the paragraph is not part of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRef {
    /// Concrete numbering instance id (`w:numId`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,

    /// Nesting level (`w:ilvl`), 0-8
    #[serde(default)]
    pub level: u8,
}

impl NumberRef {
    /// A reference into numbering definition `id` at `level`.
    ///
    /// Levels deeper than [`MAX_LEVEL`] are clamped.
    pub fn new(id: impl Into<String>, level: u8) -> Self {
        Self {
            definition_id: Some(id.into()),
            level: level.min(MAX_LEVEL),
        }
    }

    /// Reference for a paragraph outside any list.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if this paragraph takes part in a list.
    pub fn is_numbered(&self) -> bool {
        self.definition_id.is_some()
    }
}

/// A body or cell paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphRecord {
    /// Human style name (e.g. "Heading 1"); empty when unstyled
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style_name: String,

    /// Inline content in document order
    #[serde(default)]
    pub nodes: Vec<InlineNode>,

    /// List membership
    #[serde(default)]
    pub numbering: NumberRef,
}

impl ParagraphRecord {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unstyled paragraph with a single run of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![InlineNode::Run(text.into())],
            ..Default::default()
        }
    }

    /// Set the style name.
    pub fn styled(mut self, style_name: impl Into<String>) -> Self {
        self.style_name = style_name.into();
        self
    }

    /// Set the numbering reference.
    pub fn numbered(mut self, numbering: NumberRef) -> Self {
        self.numbering = numbering;
        self
    }

    /// Add an inline node.
    pub fn add_node(&mut self, node: InlineNode) {
        self.nodes.push(node);
    }

    /// Visible text, NFC-normalized and trimmed.
    pub fn raw_text(&self) -> String {
        let joined: String = self.nodes.iter().filter_map(InlineNode::visible_text).collect();
        joined.nfc().collect::<String>().trim().to_string()
    }

    /// Check if the paragraph shows no text.
    pub fn is_empty(&self) -> bool {
        self.raw_text().is_empty()
    }

    /// Number of whitespace-separated words of visible text.
    pub fn word_count(&self) -> usize {
        self.raw_text().split_whitespace().count()
    }
}
