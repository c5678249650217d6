//! Core upload types shared across InsightCloud.
//!
//! These types avoid heavy dependencies so every crate in the workspace can
//! depend on them, and they serialize cleanly into batch summaries.

pub mod config;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared format of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    PlainText,
    Pdf,
    Docx,
    Other(String),
}

impl MediaType {
    /// Parse a MIME string. Parameters such as `; charset=utf-8` are ignored.
    pub fn parse(raw: &str) -> Self {
        let essence = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_TEXT => Self::PlainText,
            MIME_PDF => Self::Pdf,
            MIME_DOCX => Self::Docx,
            _ => Self::Other(essence),
        }
    }

    /// Label a file the way the upload widget does: by extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "png" => Self::Other("image/png".into()),
            "jpg" | "jpeg" => Self::Other("image/jpeg".into()),
            "doc" => Self::Other("application/msword".into()),
            _ => Self::Other("application/octet-stream".into()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PlainText => MIME_TEXT,
            Self::Pdf => MIME_PDF,
            Self::Docx => MIME_DOCX,
            Self::Other(raw) => raw,
        }
    }

    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.as_str().to_string()
    }
}

/// One file handed over by the host for a single batch. Read once, then dropped.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: MediaType, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, labelling it by extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            name: display_name(path),
            media_type: MediaType::from_path(path),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// File name component of a path, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_parses_known_mimes() {
        assert_eq!(MediaType::parse("text/plain"), MediaType::PlainText);
        assert_eq!(
            MediaType::parse("text/plain; charset=utf-8"),
            MediaType::PlainText
        );
        assert_eq!(MediaType::parse("APPLICATION/PDF"), MediaType::Pdf);
        assert_eq!(MediaType::parse(MIME_DOCX), MediaType::Docx);
        assert_eq!(
            MediaType::parse("image/png"),
            MediaType::Other("image/png".into())
        );
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(MediaType::from_path(Path::new("a/b.TXT")), MediaType::PlainText);
        assert_eq!(MediaType::from_path(Path::new("x.pdf")), MediaType::Pdf);
        assert_eq!(MediaType::from_path(Path::new("x.docx")), MediaType::Docx);
        assert!(!MediaType::from_path(Path::new("photo.png")).is_supported());
        assert!(!MediaType::from_path(Path::new("README")).is_supported());
    }

    #[test]
    fn media_type_serializes_as_mime_string() {
        #[derive(Serialize, Deserialize)]
        struct Wrap {
            media: MediaType,
        }
        let s = toml::to_string(&Wrap {
            media: MediaType::Pdf,
        })
        .unwrap();
        assert!(s.contains("application/pdf"));
        let back: Wrap = toml::from_str("media = \"image/png\"").unwrap();
        assert_eq!(back.media, MediaType::Other("image/png".into()));
    }

    #[test]
    fn uploaded_file_from_path_uses_file_name() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello")?;
        let file = UploadedFile::from_path(&path)?;
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.media_type, MediaType::PlainText);
        assert_eq!(file.len(), 5);
        Ok(())
    }
}
