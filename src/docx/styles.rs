//! DOCX styles parsing.
//!
//! Only what paragraph extraction needs: human style names (for header
//! inference) and numbering attached to paragraph styles (for list labels).

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Maximum `w:basedOn` chain followed when resolving inherited values.
const MAX_INHERITANCE_DEPTH: usize = 10;

/// Numbering properties (`w:numPr`) as written, before inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingProps {
    /// `w:numId/@w:val`
    pub num_id: Option<String>,
    /// `w:ilvl/@w:val`
    pub level: Option<u8>,
}

impl NumberingProps {
    /// Check if neither value is set.
    pub fn is_empty(&self) -> bool {
        self.num_id.is_none() && self.level.is_none()
    }
}

/// A parsed style definition.
#[derive(Debug, Clone, Default)]
pub struct Style {
    /// Style ID (e.g., "Heading1")
    pub id: String,
    /// Style name (e.g., "heading 1")
    pub name: String,
    /// Based on another style
    pub based_on: Option<String>,
    /// Numbering set on the style's paragraph properties
    pub numbering: NumberingProps,
}

/// Collection of styles from styles.xml.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    /// Styles by ID
    pub styles: HashMap<String, Style>,
    /// Default paragraph style
    pub default_paragraph: Option<String>,
}

impl StyleMap {
    /// Parse styles from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut map = StyleMap::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_style: Option<Style> = None;
        let mut in_ppr = false;
        let mut in_num_pr = false;

        loop {
            let (e, is_empty) = match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => (e, false),
                Ok(Event::Empty(e)) => (e, true),
                Ok(Event::End(e)) => {
                    match e.local_name().as_ref() {
                        b"style" => {
                            if let Some(style) = current_style.take() {
                                map.styles.insert(style.id.clone(), style);
                            }
                            in_ppr = false;
                            in_num_pr = false;
                        }
                        b"pPr" => in_ppr = false,
                        b"numPr" => in_num_pr = false,
                        _ => {}
                    }
                    buf.clear();
                    continue;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {
                    buf.clear();
                    continue;
                }
            };

            match e.local_name().as_ref() {
                b"style" => {
                    let style = Style {
                        id: attr_value(&e, b"styleId").unwrap_or_default(),
                        ..Default::default()
                    };
                    let is_paragraph = attr_value(&e, b"type").as_deref() == Some("paragraph");
                    let is_default = matches!(attr_value(&e, b"default").as_deref(), Some("1" | "true"));
                    if is_paragraph && is_default {
                        map.default_paragraph = Some(style.id.clone());
                    }
                    if is_empty {
                        map.styles.insert(style.id.clone(), style);
                    } else {
                        current_style = Some(style);
                    }
                }
                b"name" => {
                    if let Some(ref mut style) = current_style {
                        style.name = attr_value(&e, b"val").unwrap_or_default();
                    }
                }
                b"basedOn" => {
                    if let Some(ref mut style) = current_style {
                        style.based_on = attr_value(&e, b"val");
                    }
                }
                b"pPr" if !is_empty && current_style.is_some() => in_ppr = true,
                b"numPr" if !is_empty && in_ppr => in_num_pr = true,
                b"numId" if in_num_pr => {
                    if let Some(ref mut style) = current_style {
                        style.numbering.num_id = attr_value(&e, b"val");
                    }
                }
                b"ilvl" if in_num_pr => {
                    if let Some(ref mut style) = current_style {
                        style.numbering.level = attr_value(&e, b"val").and_then(|v| v.parse().ok());
                    }
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Display name for a style id.
    ///
    /// `None` means "no explicit style", which resolves to the default
    /// paragraph style. Unknown ids fall back to the id itself.
    pub fn display_name(&self, style_id: Option<&str>) -> String {
        let id = match style_id.or(self.default_paragraph.as_deref()) {
            Some(id) => id,
            None => return String::new(),
        };
        match self.styles.get(id) {
            Some(style) if !style.name.is_empty() => style.name.clone(),
            _ => id.to_string(),
        }
    }

    /// Numbering a paragraph inherits from its style, following `w:basedOn`.
    ///
    /// The instance id and the level are resolved independently: the nearest
    /// style that sets each one wins.
    pub fn inherited_numbering(&self, style_id: Option<&str>) -> NumberingProps {
        let mut resolved = NumberingProps::default();
        let mut current = style_id
            .or(self.default_paragraph.as_deref())
            .and_then(|id| self.styles.get(id));
        let mut depth = 0;

        while let Some(style) = current {
            if resolved.num_id.is_none() {
                resolved.num_id = style.numbering.num_id.clone();
            }
            if resolved.level.is_none() {
                resolved.level = style.numbering.level;
            }
            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH || (resolved.num_id.is_some() && resolved.level.is_some()) {
                break;
            }
            current = style.based_on.as_deref().and_then(|id| self.styles.get(id));
        }

        resolved
    }
}

/// Value of the attribute whose local name is `key`.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}
