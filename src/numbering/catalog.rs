//! Numbering catalog parsing (`word/numbering.xml`).
//!
//! Abstract definitions (`w:abstractNum`) carry the per-level formats; concrete
//! instances (`w:num`) point at one of them and may override single levels
//! (`w:lvlOverride`). Paragraphs refer to concrete instance ids, so the catalog
//! is keyed by those.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::model::MAX_LEVEL;

/// Number of list levels a definition can describe.
pub const LEVEL_COUNT: usize = MAX_LEVEL as usize + 1;

/// Numeral system of a list level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumeralKind {
    /// 1, 2, 3
    #[default]
    Decimal,
    /// I, II, III
    UpperRoman,
    /// i, ii, iii
    LowerRoman,
    /// A, B, C
    UpperLetter,
    /// a, b, c
    LowerLetter,
    /// Bullet glyph, no numeral
    Bullet,
    /// Any other `w:numFmt` value
    Other,
}

impl NumeralKind {
    /// Map a `w:numFmt` value.
    pub fn from_num_fmt(num_fmt: &str) -> Self {
        match num_fmt {
            "decimal" => NumeralKind::Decimal,
            "upperRoman" => NumeralKind::UpperRoman,
            "lowerRoman" => NumeralKind::LowerRoman,
            "upperLetter" => NumeralKind::UpperLetter,
            "lowerLetter" => NumeralKind::LowerLetter,
            "bullet" => NumeralKind::Bullet,
            _ => NumeralKind::Other,
        }
    }

    /// Check if this is a letter-family kind.
    pub fn is_letter(&self) -> bool {
        matches!(self, NumeralKind::UpperLetter | NumeralKind::LowerLetter)
    }
}

/// Format descriptor of one list level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFormat {
    /// Numeral system
    pub kind: NumeralKind,
    /// Level text pattern (e.g. "%1.", "%1.%2")
    pub pattern: String,
}

impl LevelFormat {
    /// Create a level format.
    pub fn new(kind: NumeralKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }
}

impl Default for LevelFormat {
    fn default() -> Self {
        Self::new(NumeralKind::Decimal, "%1")
    }
}

/// Per-level formats of one definition; `None` where the level is undefined.
pub type LevelTable = [Option<LevelFormat>; LEVEL_COUNT];

/// Lookup from (definition id, level) to a level format.
#[derive(Debug, Clone, Default)]
pub struct NumberingCatalog {
    definitions: HashMap<String, LevelTable>,
}

impl NumberingCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from `word/numbering.xml` content.
    ///
    /// Fails with [`Error::MalformedNumberingData`] only when the XML itself
    /// cannot be read. Dangling references are not errors; they resolve to
    /// the default format at lookup time.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut builder = CatalogBuilder::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => builder.open(e),
                Ok(Event::Empty(ref e)) => {
                    builder.open(e);
                    builder.close(e.local_name().as_ref());
                }
                Ok(Event::End(ref e)) => builder.close(e.local_name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::MalformedNumberingData(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        let catalog = builder.finish();
        log::debug!("Parsed numbering catalog with {} definitions", catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog, degrading to an empty one on malformed input.
    ///
    /// `None` means the document has no numbering part, which is not an error.
    pub fn parse_or_empty(xml: Option<&str>) -> Self {
        match xml {
            None => Self::new(),
            Some(xml) => Self::parse(xml).unwrap_or_else(|e| {
                log::warn!("{}; list labels fall back to decimal", e);
                Self::new()
            }),
        }
    }

    /// Insert or replace a definition.
    pub fn insert(&mut self, definition_id: impl Into<String>, levels: LevelTable) {
        self.definitions.insert(definition_id.into(), levels);
    }

    /// Define a single level, creating the definition if needed.
    ///
    /// Levels deeper than 8 are ignored.
    pub fn set_level(&mut self, definition_id: impl Into<String>, level: u8, format: LevelFormat) {
        if let Some(slot) = self
            .definitions
            .entry(definition_id.into())
            .or_default()
            .get_mut(level as usize)
        {
            *slot = Some(format);
        }
    }

    /// Format of `level` in definition `definition_id`.
    ///
    /// Never fails: unknown ids and undefined levels give `{Decimal, "%1"}`.
    pub fn lookup(&self, definition_id: &str, level: u8) -> LevelFormat {
        self.defined(definition_id, level)
            .cloned()
            .unwrap_or_default()
    }

    /// Numeral kind of `level` in definition `definition_id`, same fallback as
    /// [`lookup`](Self::lookup).
    pub fn lookup_kind(&self, definition_id: &str, level: u8) -> NumeralKind {
        self.defined(definition_id, level)
            .map(|format| format.kind)
            .unwrap_or_default()
    }

    fn defined(&self, definition_id: &str, level: u8) -> Option<&LevelFormat> {
        self.definitions
            .get(definition_id)?
            .get(level as usize)?
            .as_ref()
    }

    /// Check if a definition id is known.
    pub fn contains(&self, definition_id: &str) -> bool {
        self.definitions.contains_key(definition_id)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A `w:num` element while it is being read.
#[derive(Debug, Default)]
struct Instance {
    num_id: String,
    abstract_id: Option<String>,
    overrides: Vec<(usize, LevelFormat)>,
}

/// Event-driven state while walking numbering.xml.
#[derive(Debug, Default)]
struct CatalogBuilder {
    abstracts: HashMap<String, LevelTable>,
    instances: Vec<Instance>,
    current_abstract: Option<String>,
    current_num: Option<Instance>,
    in_override: bool,
    current_level: Option<(usize, LevelFormat)>,
}

impl CatalogBuilder {
    fn open(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"abstractNum" => {
                let id = attr_value(e, b"abstractNumId").unwrap_or_default();
                self.abstracts.entry(id.clone()).or_default();
                self.current_abstract = Some(id);
            }
            b"num" => {
                self.current_num = Some(Instance {
                    num_id: attr_value(e, b"numId").unwrap_or_default(),
                    ..Default::default()
                });
            }
            b"abstractNumId" => {
                if let Some(ref mut instance) = self.current_num {
                    instance.abstract_id = attr_value(e, b"val");
                }
            }
            b"lvlOverride" if self.current_num.is_some() => {
                self.in_override = true;
            }
            b"lvl" if self.current_abstract.is_some() || self.in_override => {
                // A level without a readable index has no slot to fill
                let level: Option<usize> = attr_value(e, b"ilvl").and_then(|v| v.parse().ok());
                self.current_level = level.filter(|&level| level < LEVEL_COUNT).map(|level| {
                    (level, LevelFormat::new(NumeralKind::Decimal, format!("%{}", level + 1)))
                });
            }
            b"numFmt" => {
                if let Some((_, ref mut format)) = self.current_level {
                    if let Some(val) = attr_value(e, b"val") {
                        format.kind = NumeralKind::from_num_fmt(&val);
                    }
                }
            }
            b"lvlText" => {
                if let Some((_, ref mut format)) = self.current_level {
                    if let Some(val) = attr_value(e, b"val") {
                        format.pattern = val;
                    }
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"lvl" => {
                if let Some((level, format)) = self.current_level.take() {
                    if self.in_override {
                        if let Some(ref mut instance) = self.current_num {
                            instance.overrides.push((level, format));
                        }
                    } else if let Some(ref id) = self.current_abstract {
                        if let Some(table) = self.abstracts.get_mut(id) {
                            table[level] = Some(format);
                        }
                    }
                }
            }
            b"lvlOverride" => self.in_override = false,
            b"abstractNum" => self.current_abstract = None,
            b"num" => {
                if let Some(instance) = self.current_num.take() {
                    self.instances.push(instance);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> NumberingCatalog {
        let mut catalog = NumberingCatalog::new();

        for instance in self.instances {
            let mut levels = match instance.abstract_id.as_deref() {
                Some(abstract_id) => self.abstracts.get(abstract_id).cloned().unwrap_or_else(|| {
                    log::debug!(
                        "Numbering instance {} refers to missing abstract definition {}",
                        instance.num_id,
                        abstract_id
                    );
                    LevelTable::default()
                }),
                None => LevelTable::default(),
            };
            for (level, format) in instance.overrides {
                levels[level] = Some(format);
            }
            catalog.insert(instance.num_id, levels);
        }

        catalog
    }
}

/// Value of the attribute whose local name is `key`.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}
