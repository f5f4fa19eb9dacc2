//! Rendering options configuration.

/// First `para_id` handed out when none is configured.
pub const DEFAULT_START_INDEX: u64 = 100_000;

/// Paragraphs with at most this many words are taken as section headers.
pub const DEFAULT_MAX_HEADER_WORDS: usize = 6;

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `para_id` of the first emitted row
    pub start_index: u64,

    /// Word count up to which a top-level paragraph is read as a header
    pub max_header_words: usize,

    /// Emit the `label` column with reconstructed list numbers
    pub include_labels: bool,

    /// Run the plain extraction when the structured pass yields nothing
    pub fallback_on_empty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            max_header_words: DEFAULT_MAX_HEADER_WORDS,
            include_labels: true,
            fallback_on_empty: true,
        }
    }
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first `para_id`.
    pub fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = start_index;
        self
    }

    /// Set the header word threshold.
    pub fn with_max_header_words(mut self, words: usize) -> Self {
        self.max_header_words = words;
        self
    }

    /// Include or omit the label column.
    pub fn with_labels(mut self, include: bool) -> Self {
        self.include_labels = include;
        self
    }

    /// Enable or disable the plain fallback for empty results.
    pub fn with_fallback_on_empty(mut self, enabled: bool) -> Self {
        self.fallback_on_empty = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.start_index, 100000);
        assert_eq!(opts.max_header_words, 6);
        assert!(opts.include_labels);
        assert!(opts.fallback_on_empty);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_start_index(7)
            .with_max_header_words(3)
            .with_labels(false)
            .with_fallback_on_empty(false);

        assert_eq!(opts.start_index, 7);
        assert_eq!(opts.max_header_words, 3);
        assert!(!opts.include_labels);
        assert!(!opts.fallback_on_empty);
    }
}
