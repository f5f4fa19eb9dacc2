//! Lenient text recovery for bodies the structured parser rejects.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::model::ParagraphRecord;

/// Collect the visible text of every paragraph in `word/document.xml`.
///
/// End tags are not checked against their start tags. Reading stops at the
/// first error the reader cannot step over, keeping what was read so far.
/// Deleted text, moved-away text and text boxes are left out, and table
/// cells come through as ordinary paragraphs.
pub(crate) fn recover_paragraphs(xml: &str) -> Vec<ParagraphRecord> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut hidden_depth = 0u32;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" if hidden_depth == 0 => {
                    flush(&mut paragraphs, current.take());
                    current = Some(String::new());
                }
                b"del" | b"moveFrom" | b"txbxContent" | b"pPr" => hidden_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if hidden_depth == 0 => {
                if let Some(text) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" if hidden_depth == 0 => flush(&mut paragraphs, current.take()),
                b"del" | b"moveFrom" | b"txbxContent" | b"pPr" => {
                    hidden_depth = hidden_depth.saturating_sub(1);
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text && hidden_depth == 0 => {
                if let Some(text) = current.as_mut() {
                    match e.unescape() {
                        Ok(value) => text.push_str(&value),
                        Err(_) => text.push_str(&String::from_utf8_lossy(e)),
                    }
                }
            }
            Ok(Event::CData(ref e)) if in_text && hidden_depth == 0 => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "text recovery stopped at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    flush(&mut paragraphs, current);
    paragraphs
}

fn flush(paragraphs: &mut Vec<ParagraphRecord>, text: Option<String>) {
    if let Some(text) = text {
        paragraphs.push(ParagraphRecord::with_text(text));
    }
}
