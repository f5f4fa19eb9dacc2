//! Cross-paragraph list counter state.
//!
//! A [`CounterState`] belongs to exactly one document pass. The
//! [`LevelCounterTracker`] advances it one paragraph at a time, so the labels
//! it produces depend on the order of the calls; feed paragraphs in document
//! order and [`clear`](CounterState::clear) before starting another document.

use super::catalog::{NumberingCatalog, NumeralKind, LEVEL_COUNT};
use super::format::format_under;
use crate::model::MAX_LEVEL;

/// Where the tracker is relative to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContext<'a> {
    /// No numbered paragraph since the start or the last unnumbered one
    NoContext,
    /// Last paragraph was numbered with this definition and level
    InList {
        /// Definition id of the last numbered paragraph
        definition_id: &'a str,
        /// Level of the last numbered paragraph
        level: u8,
    },
}

/// Counter and label state of one document pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    counters: [u32; LEVEL_COUNT],
    rendered: [String; LEVEL_COUNT],
    kinds: [Option<NumeralKind>; LEVEL_COUNT],
    last_definition_id: Option<String>,
    last_level: Option<u8>,
}

impl CounterState {
    /// Create a state with no list context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all counters, labels and list context.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Counter value per level.
    pub fn counters(&self) -> &[u32; LEVEL_COUNT] {
        &self.counters
    }

    /// Last rendered numeral per level; empty where nothing is rendered.
    pub fn rendered_labels(&self) -> &[String; LEVEL_COUNT] {
        &self.rendered
    }

    /// Numeral kind recorded per level by the last numbered paragraph.
    pub fn recorded_kinds(&self) -> &[Option<NumeralKind>; LEVEL_COUNT] {
        &self.kinds
    }

    /// Definition id of the last numbered paragraph.
    pub fn last_definition_id(&self) -> Option<&str> {
        self.last_definition_id.as_deref()
    }

    /// Level of the last numbered paragraph; `None` before any (the -1 sentinel).
    pub fn last_level(&self) -> Option<u8> {
        self.last_level
    }

    /// Current list context.
    pub fn context(&self) -> ListContext<'_> {
        match (self.last_definition_id.as_deref(), self.last_level) {
            (Some(definition_id), Some(level)) => ListContext::InList {
                definition_id,
                level,
            },
            _ => ListContext::NoContext,
        }
    }
}

/// Advances a [`CounterState`] using the formats of a numbering catalog.
#[derive(Debug, Clone, Copy)]
pub struct LevelCounterTracker<'a> {
    catalog: &'a NumberingCatalog,
}

impl<'a> LevelCounterTracker<'a> {
    /// Create a tracker over `catalog`.
    pub fn new(catalog: &'a NumberingCatalog) -> Self {
        Self { catalog }
    }

    /// Record a numbered paragraph and return its composite label.
    ///
    /// Levels deeper than 8 are treated as level 8.
    pub fn observe(&self, state: &mut CounterState, definition_id: &str, level: u8) -> String {
        let level = level.min(MAX_LEVEL);
        let current = level as usize;
        let kind = self.catalog.lookup_kind(definition_id, level);

        // A visible format change at the same level restarts counting
        if state.last_level == Some(level) && state.kinds[current] != Some(kind) {
            state.counters[current] = 0;
        }

        state.counters[current] = state.counters[current].saturating_add(1);

        for deeper in current + 1..LEVEL_COUNT {
            state.counters[deeper] = 0;
            state.rendered[deeper].clear();
            state.kinds[deeper] = None;
        }

        for i in 0..=current {
            let kind_i = if i == current {
                kind
            } else {
                self.catalog.lookup_kind(definition_id, i as u8)
            };
            let parent = if i == 0 { None } else { state.kinds[i - 1] };
            state.rendered[i] = render_slot(state.counters[i], kind_i, parent);
            state.kinds[i] = Some(kind_i);
        }

        state.last_definition_id = Some(definition_id.to_string());
        state.last_level = Some(level);

        state.rendered[..=current].join(".")
    }

    /// Record an unnumbered paragraph: everything restarts.
    pub fn reset(&self, state: &mut CounterState) {
        state.clear();
    }
}

/// Numeral for one slot of the composite label.
///
/// Intermediate levels that were never visited keep a zero counter; they are
/// shown as "0" instead of being formatted.
fn render_slot(counter: u32, kind: NumeralKind, parent: Option<NumeralKind>) -> String {
    if counter == 0 {
        return "0".to_string();
    }
    format_under(counter, kind, parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::catalog::LevelFormat;

    fn outline_catalog() -> NumberingCatalog {
        let mut catalog = NumberingCatalog::new();
        catalog.set_level("outline", 0, LevelFormat::new(NumeralKind::UpperLetter, "%1."));
        catalog.set_level("outline", 1, LevelFormat::new(NumeralKind::LowerLetter, "%2."));
        catalog.set_level("outline", 2, LevelFormat::new(NumeralKind::LowerRoman, "%3."));
        catalog.set_level("roman", 0, LevelFormat::new(NumeralKind::UpperRoman, "%1."));
        catalog.set_level("mixed", 0, LevelFormat::new(NumeralKind::Decimal, "%1."));
        catalog.set_level("mixed", 1, LevelFormat::new(NumeralKind::LowerLetter, "%2)"));
        catalog
    }

    fn run(tracker: &LevelCounterTracker, state: &mut CounterState, refs: &[(&str, u8)]) -> Vec<String> {
        refs.iter()
            .map(|(id, level)| tracker.observe(state, id, *level))
            .collect()
    }

    #[test]
    fn test_nested_decimal_sequence() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        let labels = run(&tracker, &mut state, &[("n1", 0), ("n1", 1), ("n1", 1), ("n1", 0)]);
        assert_eq!(labels, vec!["1", "1.1", "1.2", "2"]);
    }

    #[test]
    fn test_shallower_levels_untouched() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        run(&tracker, &mut state, &[("n1", 0), ("n1", 0), ("n1", 1), ("n1", 2)]);
        for level in 0..LEVEL_COUNT as u8 {
            let before = *state.counters();
            tracker.observe(&mut state, "n1", level);
            let after = state.counters();
            for i in 0..level as usize {
                assert_eq!(before[i], after[i], "level {} changed counter {}", level, i);
            }
            for deeper in level as usize + 1..LEVEL_COUNT {
                assert_eq!(after[deeper], 0);
                assert!(state.rendered_labels()[deeper].is_empty());
            }
        }
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        assert_eq!(tracker.observe(&mut state, "n1", 0), "1");
        assert_eq!(tracker.observe(&mut state, "n1", 0), "2");
        tracker.reset(&mut state);
        assert_eq!(state.context(), ListContext::NoContext);
        assert_eq!(state.last_level(), None);
        assert_eq!(tracker.observe(&mut state, "n1", 0), "1");
    }

    #[test]
    fn test_letter_outline() {
        let catalog = outline_catalog();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        let labels = run(
            &tracker,
            &mut state,
            &[("outline", 0), ("outline", 1), ("outline", 1), ("outline", 2), ("outline", 0)],
        );
        assert_eq!(labels, vec!["A", "A.a", "A.b", "A.b.i", "B"]);
    }

    #[test]
    fn test_lower_letter_under_decimal_parent() {
        let catalog = outline_catalog();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        let labels = run(&tracker, &mut state, &[("mixed", 0), ("mixed", 1), ("mixed", 1)]);
        assert_eq!(labels, vec!["1", "1.1", "1.2"]);
    }

    #[test]
    fn test_format_change_at_same_level_restarts() {
        let catalog = outline_catalog();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        let labels = run(&tracker, &mut state, &[("n1", 0), ("n1", 0), ("roman", 0), ("roman", 0)]);
        assert_eq!(labels, vec!["1", "2", "I", "II"]);
    }

    #[test]
    fn test_same_format_other_definition_continues() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        // Both ids resolve to the decimal default, so the count carries on
        let labels = run(&tracker, &mut state, &[("a", 0), ("b", 0)]);
        assert_eq!(labels, vec!["1", "2"]);
    }

    #[test]
    fn test_skipped_levels_are_not_synthesized() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        assert_eq!(tracker.observe(&mut state, "n1", 2), "0.0.1");
        assert_eq!(tracker.observe(&mut state, "n1", 0), "1");
        assert_eq!(tracker.observe(&mut state, "n1", 2), "1.0.1");
    }

    #[test]
    fn test_deep_level_clamped() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();

        tracker.observe(&mut state, "n1", 20);
        assert_eq!(state.last_level(), Some(MAX_LEVEL));
        assert_eq!(state.counters()[LEVEL_COUNT - 1], 1);
    }

    #[test]
    fn test_context_tracks_last_paragraph() {
        let catalog = NumberingCatalog::new();
        let tracker = LevelCounterTracker::new(&catalog);
        let mut state = CounterState::new();
        assert_eq!(state.context(), ListContext::NoContext);

        tracker.observe(&mut state, "n7", 3);
        assert_eq!(
            state.context(),
            ListContext::InList {
                definition_id: "n7",
                level: 3
            }
        );
        assert_eq!(state.last_definition_id(), Some("n7"));
    }

    #[test]
    fn test_cleared_state_is_repeatable() {
        let catalog = outline_catalog();
        let tracker = LevelCounterTracker::new(&catalog);
        let refs = [("outline", 0), ("outline", 1), ("n1", 1), ("roman", 0), ("outline", 2)];

        let mut state = CounterState::new();
        let first = run(&tracker, &mut state, &refs);
        state.clear();
        let second = run(&tracker, &mut state, &refs);

        assert_eq!(first, second);
        assert_eq!(state.recorded_kinds()[0], Some(NumeralKind::UpperLetter));
    }
}
