//! # paramd
//!
//! Word documents to paragraph-referenced Markdown.
//!
//! Every body paragraph of a `.docx` file becomes one row of a Markdown table
//! with a sequential id, the section header it sits under, its list label as
//! Word would display it ("1.2", "A.b", "IV") and its text. Tables are
//! appended after the rows and referenced from them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paramd::{convert_file, render::RenderOptions};
//!
//! let markdown = convert_file("contract.docx", &RenderOptions::default())?;
//! std::fs::write("contract_output.md", markdown)?;
//! # Ok::<(), paramd::Error>(())
//! ```
//!
//! ## Working with the model
//!
//! ```no_run
//! use paramd::{label_paragraphs, parse_file};
//!
//! let doc = parse_file("contract.docx")?;
//! for (label, text) in label_paragraphs(&doc) {
//!     println!("{:>8}  {}", label, text);
//! }
//! # Ok::<(), paramd::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod numbering;
pub mod render;

// Re-exports
pub use container::OoxmlContainer;
pub use detect::{ensure_docx_bytes, ensure_docx_path};
pub use error::{Error, Result};
pub use model::{
    Block, Cell, CellBlock, Document, InlineNode, NumberRef, ParagraphRecord, Row, Table,
};
pub use numbering::{BulletExtractor, NumberingCatalog};

use std::path::Path;

use render::RenderOptions;

/// Parse a DOCX file and return a Document model.
///
/// # Example
///
/// ```no_run
/// use paramd::parse_file;
///
/// let doc = parse_file("document.docx")?;
/// println!("Paragraphs: {}", doc.paragraphs().count());
/// # Ok::<(), paramd::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    ensure_docx_path(path)?;
    docx::DocxParser::open(path)?.parse()
}

/// Parse a DOCX document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    ensure_docx_bytes(data)?;
    docx::DocxParser::from_bytes(data.to_vec())?.parse()
}

/// Convert a DOCX file to the paragraph row table.
///
/// Falls back to plain text extraction once if the structured conversion
/// fails, or if it yields nothing and
/// [`fallback_on_empty`](RenderOptions::fallback_on_empty) is set. After a
/// failure the text is recovered with a lenient reader that tolerates
/// malformed body XML. Packages that are not DOCX are rejected before any
/// conversion.
///
/// # Example
///
/// ```no_run
/// use paramd::{convert_file, render::RenderOptions};
///
/// let options = RenderOptions::new().with_start_index(1);
/// let markdown = convert_file("document.docx", &options)?;
/// # Ok::<(), paramd::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let path = path.as_ref();
    ensure_docx_path(path)?;
    convert_with(
        || docx::DocxParser::open(path)?.parse(),
        || docx::DocxParser::open(path)?.recover(),
        options,
    )
}

/// Convert DOCX bytes to the paragraph row table.
///
/// See [`convert_file`] for the fallback rules.
pub fn convert_bytes(data: &[u8], options: &RenderOptions) -> Result<String> {
    ensure_docx_bytes(data)?;
    convert_with(
        || docx::DocxParser::from_bytes(data.to_vec())?.parse(),
        || docx::DocxParser::from_bytes(data.to_vec())?.recover(),
        options,
    )
}

/// Extract plain text from a DOCX file, without numbering or headers.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc)
}

/// `(label, text)` for every non-empty body paragraph, in document order.
///
/// Labels are computed the same way as in the row table; tables are ignored.
pub fn label_paragraphs(doc: &Document) -> Vec<(String, String)> {
    let mut extractor = BulletExtractor::new(&doc.numbering);
    doc.paragraphs()
        .filter(|para| !para.is_empty())
        .map(|para| {
            let labelled = extractor.label_paragraph(para);
            (labelled.label, labelled.text)
        })
        .collect()
}

fn convert_with<L, R>(load: L, recover: R, options: &RenderOptions) -> Result<String>
where
    L: FnOnce() -> Result<Document>,
    R: FnOnce() -> Result<Document>,
{
    let structured = load().and_then(|doc| {
        let markdown = render::to_markdown(&doc, options)?;
        Ok((doc, markdown))
    });

    match structured {
        Ok((doc, markdown)) => {
            if markdown.is_empty() && options.fallback_on_empty {
                log::warn!("no paragraph rows produced, falling back to plain text");
                render::to_text(&doc)
            } else {
                Ok(markdown)
            }
        }
        Err(e) => {
            log::warn!("structured conversion failed ({}), falling back to plain text", e);
            let doc = recover()?;
            render::to_text(&doc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_paragraphs_skips_empty() {
        let mut doc = Document::new();
        doc.add_paragraph(ParagraphRecord::with_text("1. One").numbered(NumberRef::new("1", 0)));
        doc.add_paragraph(ParagraphRecord::new());
        doc.add_paragraph(ParagraphRecord::with_text("Sub").numbered(NumberRef::new("1", 1)));
        doc.add_paragraph(ParagraphRecord::with_text("Loose text"));

        assert_eq!(
            label_paragraphs(&doc),
            vec![
                ("1".to_string(), "One".to_string()),
                ("1.1".to_string(), "Sub".to_string()),
                (String::new(), "Loose text".to_string()),
            ]
        );
    }

    #[test]
    fn test_fallback_on_empty() {
        let load = || -> Result<Document> {
            let mut doc = Document::new();
            doc.add_paragraph(ParagraphRecord::with_text("Just a title"));
            Ok(doc)
        };

        let unused = || -> Result<Document> { panic!("recovery runs only after a failure") };

        let text = convert_with(load, unused, &RenderOptions::default()).unwrap();
        assert_eq!(text, "Just a title");

        let off = RenderOptions::default().with_fallback_on_empty(false);
        assert_eq!(convert_with(load, unused, &off).unwrap(), "");
    }

    #[test]
    fn test_failed_parse_recovers_plain_text() {
        let load = || -> Result<Document> { Err(Error::XmlParse("mismatched end tag".into())) };
        let recover = || -> Result<Document> {
            let mut doc = Document::new();
            doc.add_paragraph(ParagraphRecord::with_text("First"));
            doc.add_paragraph(ParagraphRecord::with_text("Second"));
            Ok(doc)
        };

        let text = convert_with(load, recover, &RenderOptions::default()).unwrap();
        assert_eq!(text, "First\n\nSecond");
    }

    #[test]
    fn test_failed_recovery_propagates() {
        let load = || -> Result<Document> { Err(Error::XmlParse("bad body".into())) };
        let recover = || -> Result<Document> { Err(Error::MissingComponent("word/document.xml".into())) };
        let err = convert_with(load, recover, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingComponent(_)));
    }

    #[test]
    fn test_rejects_non_docx_bytes() {
        let err = convert_bytes(b"plain text", &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));
    }
}
