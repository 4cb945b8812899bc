//! Plain source parser.
//!
//! The formatter does its own parsing, so the host only needs the file as
//! text. A leading byte order mark is stripped and remembered so fixes can be
//! written back without losing it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::LinterError;

/// Files larger than this are not linted.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BOM: char = '\u{feff}';

/// Parsers a preset may select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Treat the file as opaque text.
    #[default]
    Plain,
}

/// A file's text as rules see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Text without the byte order mark.
    pub text: String,
    /// Whether the file started with a byte order mark.
    pub bom: bool,
}

impl SourceFile {
    /// Returns the text as it should be written to disk.
    pub fn to_disk_text(&self, text: &str) -> String {
        if self.bom {
            format!("{BOM}{text}")
        } else {
            text.to_string()
        }
    }
}

/// Decodes file contents.
pub fn parse_plain(bytes: Vec<u8>) -> Result<SourceFile, LinterError> {
    let text = String::from_utf8(bytes)
        .map_err(|e| LinterError::parse(format!("File is not valid UTF-8: {}", e)))?;

    Ok(match text.strip_prefix(BOM) {
        Some(rest) => SourceFile {
            text: rest.to_string(),
            bom: true,
        },
        None => SourceFile { text, bom: false },
    })
}

/// Reads and decodes a file, enforcing [`MAX_FILE_SIZE`].
pub fn read_source(path: &Path) -> Result<SourceFile, LinterError> {
    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let bytes = fs::read(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_plain(bytes).map_err(|e| match e {
        LinterError::Parse(message) => {
            LinterError::parse(format!("{}: {}", path.display(), message))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn plain_text() {
        let file = parse_plain(b"let a = 1;\n".to_vec()).unwrap();

        assert_eq!(file.text, "let a = 1;\n");
        assert!(!file.bom);
        assert_eq!(file.to_disk_text("x"), "x");
    }

    #[test]
    fn strips_and_restores_bom() {
        let file = parse_plain("\u{feff}let a".as_bytes().to_vec()).unwrap();

        assert_eq!(file.text, "let a");
        assert!(file.bom);
        assert_eq!(file.to_disk_text("let a;"), "\u{feff}let a;");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_plain(vec![b'a', 0xff, b'b']).unwrap_err();
        assert!(matches!(err, LinterError::Parse(_)));
    }

    #[test]
    fn read_source_rejects_directories() {
        let dir = tempdir().unwrap();

        let err = read_source(dir.path()).unwrap_err();

        assert!(err.to_string().contains("Not a regular file"));
    }

    #[test]
    fn read_source_reports_path_on_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.js");
        fs::write(&path, [0xc3, 0x28]).unwrap();

        let err = read_source(&path).unwrap_err();

        assert!(err.to_string().contains("bin.js"));
    }

    #[test]
    fn parser_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ParserKind::Plain).unwrap(), "\"plain\"");
    }
}
