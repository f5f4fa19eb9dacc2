//! Package detection: only WordprocessingML packages are accepted.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type of the DOCX main document part.
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Content types of Office packages that are recognized but not handled.
const OTHER_OFFICE_CONTENT_TYPES: &[(&str, &str)] = &[
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        "spreadsheet (xlsx)",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "presentation (pptx)",
    ),
];

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Verify that `data` is a DOCX package.
///
/// Non-ZIP input is `UnknownFormat`; other Office packages are
/// `UnsupportedFormat`.
pub fn ensure_docx_bytes(data: &[u8]) -> Result<()> {
    if !is_zip_file(data) {
        return Err(Error::UnknownFormat);
    }
    ensure_docx_reader(std::io::Cursor::new(data))
}

/// Verify that the file at `path` is a DOCX package.
pub fn ensure_docx_path(path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_err() || !is_zip_file(&magic) {
        return Err(Error::UnknownFormat);
    }
    file.seek(SeekFrom::Start(0))?;
    ensure_docx_reader(file)
}

/// Verify that the ZIP archive behind `reader` is a DOCX package.
pub fn ensure_docx_reader<R: Read + Seek>(reader: R) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let content_types = match archive.by_name("[Content_Types].xml") {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            decode_xml_bytes(&bytes)?
        }
        Err(_) => return Err(Error::MissingComponent("[Content_Types].xml".to_string())),
    };

    if content_types.contains(DOCX_CONTENT_TYPE) {
        return Ok(());
    }

    for (content_type, label) in OTHER_OFFICE_CONTENT_TYPES {
        if content_types.contains(content_type) {
            return Err(Error::UnsupportedFormat((*label).to_string()));
        }
    }

    // Some producers write a generic content type; fall back on the folder layout
    if archive.file_names().any(|n| n == "word/document.xml") {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn package(content_types: &str, parts: &[&str]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(content_types.as_bytes()).unwrap();
            for part in parts {
                zip.start_file(*part, options).unwrap();
                zip.write_all(b"<x/>").unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B]));
    }

    #[test]
    fn test_detect_invalid_data() {
        let result = ensure_docx_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_accepts_docx_content_type() {
        let data = package(
            &format!("<Types><Override ContentType=\"{}\"/></Types>", DOCX_CONTENT_TYPE),
            &["word/document.xml"],
        );
        assert!(ensure_docx_bytes(&data).is_ok());
    }

    #[test]
    fn test_rejects_workbook() {
        let data = package(
            "<Types><Override ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/></Types>",
            &["xl/workbook.xml"],
        );
        assert!(matches!(
            ensure_docx_bytes(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_folder_fallback() {
        let data = package("<Types/>", &["word/document.xml"]);
        assert!(ensure_docx_bytes(&data).is_ok());

        let data = package("<Types/>", &["other/part.xml"]);
        assert!(matches!(ensure_docx_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_ensure_docx_path() {
        let dir = tempfile::tempdir().unwrap();

        let docx = dir.path().join("report.docx");
        std::fs::write(&docx, package("<Types/>", &["word/document.xml"])).unwrap();
        assert!(ensure_docx_path(&docx).is_ok());

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hi").unwrap();
        assert!(matches!(ensure_docx_path(&text), Err(Error::UnknownFormat)));

        let missing = dir.path().join("missing.docx");
        assert!(matches!(ensure_docx_path(&missing), Err(Error::Io(_))));
    }
}
