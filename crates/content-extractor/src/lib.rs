//! Content extraction for uploaded documents.
//!
//! Each format lives behind the [`Extractor`] trait. [`ExtractorStack`] holds
//! the closed set of supported formats (plain text, PDF, DOCX) and dispatches
//! on the declared media type. Anything else is reported as unsupported; the
//! caller decides how to surface that, extraction never panics on bad input.

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use core_types::config::ExtractConfig;
use core_types::{MediaType, UploadedFile};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Size limits applied to every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLimits {
    pub max_bytes: u64,
    pub max_chars: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self::from(&ExtractConfig::default())
    }
}

impl From<&ExtractConfig> for ExtractLimits {
    fn from(cfg: &ExtractConfig) -> Self {
        Self {
            max_bytes: cfg.max_file_bytes,
            max_chars: cfg.max_chars,
        }
    }
}

/// Per-file extraction inputs.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub name: &'a str,
    pub media_type: &'a MediaType,
    pub max_bytes: u64,
    pub max_chars: usize,
}

impl<'a> ExtractContext<'a> {
    pub fn new(name: &'a str, media_type: &'a MediaType, limits: ExtractLimits) -> Self {
        Self {
            name,
            media_type,
            max_bytes: limits.max_bytes,
            max_chars: limits.max_chars,
        }
    }

    pub fn for_file(file: &'a UploadedFile, limits: ExtractLimits) -> Self {
        Self::new(&file.name, &file.media_type, limits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    /// Name of the extractor that produced the text.
    pub extractor: &'static str,
    /// Text was cut at `max_chars`.
    pub truncated: bool,
    pub bytes_processed: usize,
    /// Page count for paginated formats.
    pub pages: Option<usize>,
}

/// Coarse classification used when reporting a failed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unsupported,
    Unreadable,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    Unsupported(String),
    #[error("text is not valid UTF-8: {0}")]
    Decode(String),
    #[error("failed to read PDF: {0}")]
    Pdf(String),
    #[error("failed to read DOCX: {0}")]
    Docx(String),
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Unsupported(_) => FailureKind::Unsupported,
            _ => FailureKind::Unreadable,
        }
    }
}

pub trait Extractor {
    fn name(&self) -> &'static str;

    fn supports(&self, ctx: &ExtractContext) -> bool;

    fn extract(&self, ctx: &ExtractContext, bytes: &[u8])
    -> Result<ExtractedContent, ExtractError>;
}

/// Ordered set of extractors; the first one that supports a file wins.
pub struct ExtractorStack {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorStack {
    /// Plain text, PDF and DOCX, in that order.
    pub fn with_defaults() -> Self {
        Self {
            extractors: vec![
                Box::new(PlainTextExtractor::new()),
                Box::new(PdfExtractor::new()),
                Box::new(DocxExtractor::new()),
            ],
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub fn supports(&self, ctx: &ExtractContext) -> bool {
        self.extractors.iter().any(|e| e.supports(ctx))
    }

    pub fn extract(
        &self,
        ctx: &ExtractContext,
        bytes: &[u8],
    ) -> Result<ExtractedContent, ExtractError> {
        let size = bytes.len() as u64;
        if size > ctx.max_bytes {
            return Err(ExtractError::TooLarge {
                size,
                limit: ctx.max_bytes,
            });
        }

        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(ctx))
            .ok_or_else(|| ExtractError::Unsupported(ctx.media_type.to_string()))?;

        debug!(
            extractor = extractor.name(),
            file = ctx.name,
            media_type = %ctx.media_type,
            bytes = bytes.len(),
            "extracting"
        );
        extractor.extract(ctx, bytes)
    }

    pub fn extract_file(
        &self,
        file: &UploadedFile,
        limits: ExtractLimits,
    ) -> Result<ExtractedContent, ExtractError> {
        let ctx = ExtractContext::for_file(file, limits);
        self.extract(&ctx, &file.bytes)
    }
}

impl Default for ExtractorStack {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Cut `text` in place to `ctx.max_chars` characters. Returns whether anything was dropped.
pub fn enforce_limits_str(text: &mut String, ctx: &ExtractContext) -> bool {
    match text.char_indices().nth(ctx.max_chars) {
        Some((cut, _)) => {
            text.truncate(cut);
            true
        }
        None => false,
    }
}

/// Finish an extraction: apply the character limit and fill in bookkeeping.
pub(crate) fn finish(
    ctx: &ExtractContext,
    extractor: &'static str,
    mut text: String,
    bytes_processed: usize,
    pages: Option<usize>,
) -> ExtractedContent {
    let truncated = enforce_limits_str(&mut text, ctx);
    ExtractedContent {
        text,
        extractor,
        truncated,
        bytes_processed,
        pages,
    }
}
