//! List-numbering reconstruction.
//!
//! Word stores only a numbering reference per paragraph (instance id and
//! level); the visible label ("1.2", "b", "IV") is computed at display time.
//! This module recomputes it:
//!
//! - [`NumberingCatalog`] resolves (definition id, level) to a [`LevelFormat`].
//! - [`format`] renders a counter value as a numeral.
//! - [`LevelCounterTracker`] advances the per-document [`CounterState`].
//! - [`BulletExtractor`] labels paragraphs in document order and removes
//!   numerals the text already shows.
//!
//! # Example
//!
//! ```
//! use paramd::model::NumberRef;
//! use paramd::numbering::{BulletExtractor, NumberingCatalog};
//!
//! let catalog = NumberingCatalog::new();
//! let mut extractor = BulletExtractor::new(&catalog);
//!
//! assert_eq!(extractor.extract_label(&NumberRef::new("1", 0)), "1");
//! assert_eq!(extractor.extract_label(&NumberRef::new("1", 1)), "1.1");
//! assert_eq!(extractor.extract_label(&NumberRef::new("1", 0)), "2");
//! ```

mod bullet;
mod catalog;
pub mod format;
mod tracker;

pub use bullet::{is_top_level, BulletExtractor, LabelledText, NumeralPrefix};
pub use catalog::{LevelFormat, LevelTable, NumberingCatalog, NumeralKind, LEVEL_COUNT};
pub use tracker::{CounterState, LevelCounterTracker, ListContext};
