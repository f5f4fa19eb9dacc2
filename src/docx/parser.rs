//! DOCX parser implementation.

use quick_xml::events::{BytesStart, Event};

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::model::{Block, Cell, Document, InlineNode, NumberRef, ParagraphRecord, Row, Table};
use crate::numbering::NumberingCatalog;

use super::recover::recover_paragraphs;
use super::styles::{NumberingProps, StyleMap};

/// `w:numId` value Word writes to switch numbering off.
const NUMBERING_REMOVED: &str = "0";

/// Parser for DOCX (Word) documents.
pub struct DocxParser {
    container: OoxmlContainer,
    styles: StyleMap,
    numbering: NumberingCatalog,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from a container.
    fn from_container(container: OoxmlContainer) -> Result<Self> {
        let styles = match container.read_optional_xml("word/styles.xml")? {
            Some(xml) => StyleMap::parse(&xml).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable styles part: {}", e);
                StyleMap::default()
            }),
            None => StyleMap::default(),
        };

        let numbering_xml = container.read_optional_xml("word/numbering.xml")?;
        let numbering = NumberingCatalog::parse_or_empty(numbering_xml.as_deref());

        Ok(Self {
            container,
            styles,
            numbering,
        })
    }

    /// Parse the document body into paragraphs and tables, in order.
    pub fn parse(&mut self) -> Result<Document> {
        let xml = self.container.read_xml("word/document.xml")?;
        let mut walker = BodyWalker::new(&self.styles);
        walker.walk(&xml)?;

        let mut doc = Document::with_numbering(self.numbering.clone());
        doc.blocks = walker.blocks;
        log::debug!(
            "parsed {} body blocks, {} numbering definitions",
            doc.blocks.len(),
            doc.numbering.len()
        );
        Ok(doc)
    }

    /// Read only the paragraph text of the body, tolerating malformed XML.
    ///
    /// The result has no numbering, styles or tables; it feeds the plain text
    /// fallback when [`parse`](Self::parse) fails.
    pub fn recover(&self) -> Result<Document> {
        let xml = self.container.read_xml("word/document.xml")?;
        let mut doc = Document::new();
        for para in recover_paragraphs(&xml) {
            doc.add_paragraph(para);
        }
        log::debug!("recovered {} paragraphs as plain text", doc.blocks.len());
        Ok(doc)
    }

    /// Get the styles read from the package.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Get the underlying container.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }
}

/// Which wrapper the current text sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    Run,
    Hyperlink,
    Insertion,
    Deletion,
}

impl InlineKind {
    fn node(self, text: &str) -> InlineNode {
        let text = text.to_string();
        match self {
            InlineKind::Run => InlineNode::Run(text),
            InlineKind::Hyperlink => InlineNode::Hyperlink(text),
            InlineKind::Insertion => InlineNode::Insertion(text),
            InlineKind::Deletion => InlineNode::Deletion(text),
        }
    }

    fn matches(self, node: &InlineNode) -> bool {
        matches!(
            (self, node),
            (InlineKind::Run, InlineNode::Run(_))
                | (InlineKind::Hyperlink, InlineNode::Hyperlink(_))
                | (InlineKind::Insertion, InlineNode::Insertion(_))
                | (InlineKind::Deletion, InlineNode::Deletion(_))
        )
    }
}

/// A paragraph being read.
#[derive(Debug, Default)]
struct OpenParagraph {
    record: ParagraphRecord,
    style_id: Option<String>,
    direct_numbering: NumberingProps,
    wrappers: Vec<InlineKind>,
    in_ppr: bool,
    /// Inside `w:pPrChange`, which holds the properties before a tracked edit
    in_ppr_change: bool,
    in_num_pr: bool,
    in_text: bool,
}

impl OpenParagraph {
    fn current_kind(&self) -> InlineKind {
        self.wrappers.last().copied().unwrap_or(InlineKind::Run)
    }

    /// Append text to the last node when it is of the same kind.
    fn push_text(&mut self, kind: InlineKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.record.nodes.last_mut() {
            Some(last) if kind.matches(last) => last.push_str(text),
            _ => self.record.add_node(kind.node(text)),
        }
    }
}

/// A table being read, with its open row and cell.
#[derive(Debug, Default)]
struct OpenTable {
    table: Table,
    row: Option<Row>,
    cell: Option<OpenCell>,
}

#[derive(Debug, Default)]
struct OpenCell {
    cell: Cell,
    grid_span: usize,
    continues_merge: bool,
}

impl OpenTable {
    /// Close the open cell, repeating it over every grid column it spans.
    ///
    /// A vertically merged continuation shows the content of the cell above.
    fn close_cell(&mut self) {
        let (Some(open), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return;
        };

        let column = row.cells.len();
        let cell = if open.continues_merge {
            self.table
                .rows
                .last()
                .and_then(|above| above.cells.get(column))
                .cloned()
                .unwrap_or(open.cell)
        } else {
            open.cell
        };

        for _ in 1..open.grid_span.max(1) {
            row.add_cell(cell.clone());
        }
        row.add_cell(cell);
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            self.table.add_row(row);
        }
    }
}

/// Streaming walk over `word/document.xml`.
struct BodyWalker<'a> {
    styles: &'a StyleMap,
    blocks: Vec<Block>,
    tables: Vec<OpenTable>,
    paragraph: Option<OpenParagraph>,
    in_body: bool,
    /// Depth inside text boxes, whose content is not part of the body flow
    skip_depth: u32,
}

impl<'a> BodyWalker<'a> {
    fn new(styles: &'a StyleMap) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
            tables: Vec::new(),
            paragraph: None,
            in_body: false,
            skip_depth: 0,
        }
    }

    fn walk(&mut self, xml: &str) -> Result<()> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => self.start(e),
                Ok(Event::Empty(ref e)) => {
                    self.start(e);
                    self.end(e.local_name().as_ref());
                }
                Ok(Event::End(ref e)) => self.end(e.local_name().as_ref()),
                Ok(Event::Text(ref e)) => {
                    if let Some(para) = self.paragraph.as_mut().filter(|p| p.in_text) {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::XmlParse(err.to_string()))?;
                        let kind = para.current_kind();
                        para.push_text(kind, &text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(para) = self.paragraph.as_mut().filter(|p| p.in_text) {
                        let text = String::from_utf8_lossy(e).to_string();
                        let kind = para.current_kind();
                        para.push_text(kind, &text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlParse(format!(
                        "word/document.xml at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    fn start(&mut self, e: &BytesStart) {
        let name = e.local_name();
        let name = name.as_ref();

        if name == b"body" {
            self.in_body = true;
            return;
        }
        if !self.in_body {
            return;
        }
        if name == b"txbxContent" {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        if let Some(para) = self.paragraph.as_mut() {
            match name {
                b"pPrChange" => para.in_ppr_change = true,
                _ if para.in_ppr_change => {}
                b"pPr" => para.in_ppr = true,
                b"numPr" if para.in_ppr => para.in_num_pr = true,
                b"pStyle" if para.in_ppr => para.style_id = attr_value(e, b"val"),
                b"numId" if para.in_num_pr => para.direct_numbering.num_id = attr_value(e, b"val"),
                b"ilvl" if para.in_num_pr => {
                    para.direct_numbering.level = attr_value(e, b"val").and_then(|v| v.parse().ok());
                }
                b"hyperlink" => para.wrappers.push(InlineKind::Hyperlink),
                // Tracked moves read like a deletion at the source and an
                // insertion at the destination
                b"ins" | b"moveTo" => para.wrappers.push(InlineKind::Insertion),
                b"del" | b"moveFrom" => para.wrappers.push(InlineKind::Deletion),
                b"t" => para.in_text = true,
                b"delText" => {
                    para.wrappers.push(InlineKind::Deletion);
                    para.in_text = true;
                }
                b"tab" if !para.in_ppr => {
                    let kind = para.current_kind();
                    para.push_text(kind, "\t");
                }
                b"br" | b"cr" if !para.in_ppr => {
                    let kind = para.current_kind();
                    para.push_text(kind, "\n");
                }
                _ => {}
            }
            return;
        }

        match name {
            b"p" => self.paragraph = Some(OpenParagraph::default()),
            b"tbl" => self.tables.push(OpenTable::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.close_row();
                    table.row = Some(Row::new());
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.close_cell();
                    table.cell = Some(OpenCell {
                        grid_span: 1,
                        ..Default::default()
                    });
                }
            }
            b"gridSpan" => {
                if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                    cell.grid_span = attr_value(e, b"val")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(1);
                }
            }
            b"vMerge" => {
                if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                    cell.continues_merge = attr_value(e, b"val")
                        .is_none_or(|v| v == "continue");
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if name == b"body" {
            self.in_body = false;
            return;
        }
        if !self.in_body {
            return;
        }
        if name == b"txbxContent" {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        if name == b"p" {
            if let Some(para) = self.paragraph.take() {
                let record = self.finish_paragraph(para);
                self.place_paragraph(record);
            }
            return;
        }

        if let Some(para) = self.paragraph.as_mut() {
            match name {
                b"pPrChange" => para.in_ppr_change = false,
                _ if para.in_ppr_change => {}
                b"pPr" => para.in_ppr = false,
                b"numPr" => para.in_num_pr = false,
                b"hyperlink" | b"ins" | b"del" | b"moveTo" | b"moveFrom" => {
                    para.wrappers.pop();
                }
                b"t" => para.in_text = false,
                b"delText" => {
                    para.in_text = false;
                    para.wrappers.pop();
                }
                _ => {}
            }
            return;
        }

        match name {
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.close_cell();
                }
            }
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.close_row();
                }
            }
            b"tbl" => {
                if let Some(mut open) = self.tables.pop() {
                    open.close_row();
                    if self.tables.is_empty() {
                        self.blocks.push(Block::Table(open.table));
                    } else if let Some(parent) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                        parent.cell.add_table(open.table);
                    } else {
                        log::debug!("dropping table found outside a cell");
                    }
                }
            }
            _ => {}
        }
    }

    /// Resolve style name and numbering once the paragraph is complete.
    fn finish_paragraph(&self, para: OpenParagraph) -> ParagraphRecord {
        let style_id = para.style_id.as_deref();
        let inherited = self.styles.inherited_numbering(style_id);

        let num_id = para.direct_numbering.num_id.or(inherited.num_id);
        let level = para
            .direct_numbering
            .level
            .or(inherited.level)
            .unwrap_or(0);

        let numbering = match num_id {
            Some(id) if id != NUMBERING_REMOVED => NumberRef::new(id, level),
            _ => NumberRef::none(),
        };

        let mut record = para.record;
        record.style_name = self.styles.display_name(style_id);
        record.numbering = numbering;
        record
    }

    fn place_paragraph(&mut self, record: ParagraphRecord) {
        match self.tables.last_mut() {
            Some(table) => match table.cell.as_mut() {
                Some(open) => open.cell.add_paragraph(record),
                None => log::debug!("dropping paragraph found outside a cell"),
            },
            None => self.blocks.push(Block::Paragraph(record)),
        }
    }
}

/// Value of the attribute whose local name is `key`.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}
