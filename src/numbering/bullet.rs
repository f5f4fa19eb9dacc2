//! Per-paragraph list labels and numeral de-duplication.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::catalog::NumberingCatalog;
use super::tracker::{CounterState, LevelCounterTracker};
use crate::model::{NumberRef, ParagraphRecord};

/// Leading numeral typed into the paragraph text itself: dot-separated
/// alphanumeric tokens closed by `.` or `)`, then whitespace.
const NUMERAL_PREFIX_PATTERN: &str = r"^[\p{L}\p{N}]+(?:\.[\p{L}\p{N}]+)*[.)]\s+";

/// Label and display text of one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledText {
    /// Composite list label ("" outside lists)
    pub label: String,
    /// Paragraph text with any duplicated numeral removed
    pub text: String,
}

impl LabelledText {
    /// Check if the label is a top-level one (empty or without a `.`).
    pub fn is_top_level(&self) -> bool {
        is_top_level(&self.label)
    }
}

/// Check if `label` is top-level: empty, or a single numeral with no `.`.
pub fn is_top_level(label: &str) -> bool {
    !label.contains('.')
}

/// Matcher for a numeral the document already shows in the paragraph text.
#[derive(Debug, Clone)]
pub struct NumeralPrefix {
    pattern: Regex,
}

impl NumeralPrefix {
    /// Compile the matcher.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(NUMERAL_PREFIX_PATTERN).expect("numeral prefix pattern is valid"),
        }
    }

    /// Length in bytes of the leading numeral, if `text` starts with one.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|m| m.end())
    }

    /// `text` without its leading numeral.
    pub fn strip<'t>(&self, text: &'t str) -> &'t str {
        match self.find(text) {
            Some(end) => &text[end..],
            None => text,
        }
    }
}

impl Default for NumeralPrefix {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces list labels for a document's paragraphs, in order.
///
/// Owns the counter state of one document pass.
#[derive(Debug, Clone)]
pub struct BulletExtractor<'a> {
    tracker: LevelCounterTracker<'a>,
    state: CounterState,
    numeral_prefix: NumeralPrefix,
}

impl<'a> BulletExtractor<'a> {
    /// Start a pass over a document using `catalog`.
    pub fn new(catalog: &'a NumberingCatalog) -> Self {
        Self {
            tracker: LevelCounterTracker::new(catalog),
            state: CounterState::new(),
            numeral_prefix: NumeralPrefix::new(),
        }
    }

    /// Composite label for the next paragraph.
    ///
    /// An unnumbered reference returns "" and resets all counters.
    pub fn extract_label(&mut self, number_ref: &NumberRef) -> String {
        match number_ref.definition_id.as_deref() {
            Some(definition_id) => {
                self.tracker
                    .observe(&mut self.state, definition_id, number_ref.level)
            }
            None => {
                self.tracker.reset(&mut self.state);
                String::new()
            }
        }
    }

    /// Text to display next to `label`.
    ///
    /// The leading numeral is only removed when a label was produced.
    pub fn display_text(&self, label: &str, raw_text: &str) -> String {
        if label.is_empty() {
            raw_text.to_string()
        } else {
            self.numeral_prefix.strip(raw_text).to_string()
        }
    }

    /// Label the next paragraph and clean its text.
    pub fn label_paragraph(&mut self, para: &ParagraphRecord) -> LabelledText {
        let label = self.extract_label(&para.numbering);
        let text = self.display_text(&label, &para.raw_text());
        LabelledText { label, text }
    }

    /// Counter state of this pass.
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Clear the counter state before another document.
    pub fn reset(&mut self) {
        self.state.clear();
    }
}
