//! Plain file readers for text and PDF documents.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("The file at {0} was not found")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to extract text from PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },
}

impl FileReadError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FileReadError::NotFound(path.to_path_buf())
        } else {
            FileReadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Reads a UTF-8 text file into a single string.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String, FileReadError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| FileReadError::from_io(path, e))
}

/// Reads a UTF-8 text file as a list of lines, without line terminators.
pub fn read_text_lines(path: impl AsRef<Path>) -> Result<Vec<String>, FileReadError> {
    Ok(read_text_file(path)?.lines().map(String::from).collect())
}

/// Reads a PDF file and returns the text of all pages concatenated.
pub fn read_pdf(path: impl AsRef<Path>) -> Result<String, FileReadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FileReadError::from_io(path, e))?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| FileReadError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_text_file_returns_whole_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Name: Jane Doe\nSkills: Rust, SQL\n").unwrap();

        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "Name: Jane Doe\nSkills: Rust, SQL\n");
    }

    #[test]
    fn test_read_text_lines_splits_on_newlines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\r\nsecond\nthird").unwrap();

        let lines = read_text_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        match read_text_file(&missing) {
            Err(FileReadError::NotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_text_file(dir.path()),
            Err(FileReadError::Io { .. })
        ));
    }

    #[test]
    fn test_read_pdf_rejects_non_pdf_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "definitely not a pdf").unwrap();

        assert!(matches!(
            read_pdf(file.path()),
            Err(FileReadError::Pdf { .. })
        ));
    }

    #[test]
    fn test_read_pdf_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_pdf(dir.path().join("resume.pdf")),
            Err(FileReadError::NotFound(_))
        ));
    }
}
