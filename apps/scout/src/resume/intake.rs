//! Résumé intake: upload allow-list and raw text extraction for PDF and DOCX.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),

    #[error("No text could be extracted from the document")]
    EmptyDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classifies a filename by its last extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;
        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// True when the filename carries an extension on the upload allow-list.
pub fn allowed_file(filename: &str) -> bool {
    DocumentKind::from_filename(filename).is_some()
}

/// Extracts the raw text of an uploaded document.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| ExtractError::Unsupported(filename.to_string()))?;

    let text = match kind {
        DocumentKind::Pdf => extract_pdf_text(data)?,
        DocumentKind::Docx => extract_docx_text(data)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    Ok(text)
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let docx_err = |e: &dyn std::fmt::Display| ExtractError::Docx(e.to_string());

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| docx_err(&e))?;
    let mut document_file = archive
        .by_name("word/document.xml")
        .map_err(|e| docx_err(&e))?;
    let mut xml = String::new();
    document_file
        .read_to_string(&mut xml)
        .map_err(|e| docx_err(&e))?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => {
                in_paragraph = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                if !current.trim().is_empty() {
                    paragraphs.push(current.trim().to_string());
                }
                current.clear();
                in_paragraph = false;
            }
            Ok(Event::Empty(e)) if in_paragraph && e.name().as_ref() == b"w:tab" => {
                current.push(' ');
            }
            Ok(Event::Text(e)) if in_paragraph => {
                let value = e.xml_content().map_err(|e| docx_err(&e))?;
                current.push_str(&value);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_err(&e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Builds a minimal DOCX archive whose body holds one paragraph per entry.
    pub(crate) fn make_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let mut out = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut out);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        out.into_inner()
    }

    #[test]
    fn test_allowed_file_accepts_pdf_and_docx_any_case() {
        assert!(allowed_file("resume.pdf"));
        assert!(allowed_file("Resume.PDF"));
        assert!(allowed_file("cv.final.docx"));
    }

    #[test]
    fn test_allowed_file_rejects_others() {
        assert!(!allowed_file("resume.txt"));
        assert!(!allowed_file("resume"));
        assert!(!allowed_file(""));
        assert!(!allowed_file("resume.pdf.exe"));
    }

    #[test]
    fn test_document_kind_uses_last_extension() {
        assert_eq!(DocumentKind::from_filename("a.docx.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("a.pdf.docx"), Some(DocumentKind::Docx));
    }

    #[test]
    fn test_extract_docx_joins_paragraphs() {
        let data = make_docx(&["Jane Doe", "Engineer at Acme", "Skills: Rust, SQL"]);
        let text = extract_text("jane.docx", &data).unwrap();
        assert_eq!(text, "Jane Doe\nEngineer at Acme\nSkills: Rust, SQL");
    }

    #[test]
    fn test_extract_empty_docx_is_empty_document() {
        let data = make_docx(&[]);
        assert!(matches!(
            extract_text("blank.docx", &data),
            Err(ExtractError::EmptyDocument)
        ));
    }

    #[test]
    fn test_extract_corrupt_docx_fails() {
        assert!(matches!(
            extract_text("broken.docx", b"not a zip archive"),
            Err(ExtractError::Docx(_))
        ));
    }

    #[test]
    fn test_extract_corrupt_pdf_fails() {
        assert!(matches!(
            extract_text("broken.pdf", b"not a pdf"),
            Err(ExtractError::Pdf(_))
        ));
    }

    #[test]
    fn test_extract_unsupported_extension() {
        assert!(matches!(
            extract_text("notes.txt", b"hello"),
            Err(ExtractError::Unsupported(_))
        ));
    }
}
