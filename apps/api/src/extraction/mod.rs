//! Resume text extraction: turns an uploaded document into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`: `LocalTextExtractor` by default,
//! `LlmTextExtractor` when ENABLE_LLM_EXTRACTION is set. A failed extraction means
//! "no resume text available" and the matcher is never invoked for it.

pub mod prompts;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::prompts::{EXTRACT_RESUME_PROMPT, EXTRACT_RESUME_SYSTEM};
use crate::llm_client::{Attachment, LlmClient};

pub const MEDIA_TYPE_TEXT: &str = "text/plain";
pub const MEDIA_TYPE_PDF: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("document is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("LLM extraction failed: {0}")]
    Llm(String),

    #[error("document contains no extractable text")]
    Empty,
}

/// An uploaded document: raw bytes plus a declared media type.
#[derive(Debug, Clone)]
pub struct Document {
    pub media_type: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Parses `data:<mimetype>;base64,<data>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, ExtractionError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ExtractionError::MalformedDataUri("missing 'data:' prefix".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ExtractionError::MalformedDataUri("missing ',' separator".into()))?;
        let media_type = header.strip_suffix(";base64").ok_or_else(|| {
            ExtractionError::MalformedDataUri("only base64 data URIs are supported".into())
        })?;
        if media_type.is_empty() {
            return Err(ExtractionError::MalformedDataUri("missing media type".into()));
        }

        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| ExtractionError::MalformedDataUri(e.to_string()))?;

        Ok(Self::new(media_type.to_ascii_lowercase(), bytes))
    }

    /// Media type without parameters, e.g. `text/plain` for `text/plain; charset=utf-8`.
    pub fn essence(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, document: &Document) -> Result<String, ExtractionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalTextExtractor: plain text and PDF, no network
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalTextExtractor;

#[async_trait]
impl TextExtractor for LocalTextExtractor {
    async fn extract_text(&self, document: &Document) -> Result<String, ExtractionError> {
        let text = match document.essence().as_str() {
            MEDIA_TYPE_TEXT => String::from_utf8(document.bytes.to_vec())
                .map_err(|_| ExtractionError::InvalidUtf8)?,
            MEDIA_TYPE_PDF => {
                let bytes = document.bytes.clone();
                tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                    .await
                    .map_err(|e| ExtractionError::Pdf(e.to_string()))??
            }
            other => return Err(ExtractionError::UnsupportedMediaType(other.to_string())),
        };

        non_empty(text)
    }
}

/// pdf-extract panics on some malformed files; contain it.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => {
            warn!("pdf-extract panicked while reading an uploaded resume");
            Err(ExtractionError::Pdf("parser panicked".to_string()))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTextExtractor: hands the document to the LLM
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmTextExtractor(pub LlmClient);

#[async_trait]
impl TextExtractor for LlmTextExtractor {
    async fn extract_text(&self, document: &Document) -> Result<String, ExtractionError> {
        let media_type = document.essence();
        if media_type == MEDIA_TYPE_TEXT {
            return LocalTextExtractor.extract_text(document).await;
        }
        if media_type != MEDIA_TYPE_PDF {
            return Err(ExtractionError::UnsupportedMediaType(media_type));
        }

        let text = self
            .0
            .call_text(
                EXTRACT_RESUME_PROMPT,
                EXTRACT_RESUME_SYSTEM,
                Some(Attachment {
                    media_type: &media_type,
                    bytes: &document.bytes,
                }),
            )
            .await
            .map_err(|e| ExtractionError::Llm(e.to_string()))?;

        debug!("LLM extracted {} characters of resume text", text.len());
        non_empty(text)
    }
}

fn non_empty(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::Empty)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_decodes_payload() {
        let doc = Document::from_data_uri("data:text/plain;base64,UmVhY3QgYW5kIFNRTA==").unwrap();
        assert_eq!(doc.media_type, "text/plain");
        assert_eq!(&doc.bytes[..], b"React and SQL");
    }

    #[test]
    fn test_data_uri_requires_prefix() {
        assert!(matches!(
            Document::from_data_uri("text/plain;base64,AAAA"),
            Err(ExtractionError::MalformedDataUri(_))
        ));
    }

    #[test]
    fn test_data_uri_requires_base64() {
        assert!(matches!(
            Document::from_data_uri("data:text/plain,hello"),
            Err(ExtractionError::MalformedDataUri(_))
        ));
    }

    #[test]
    fn test_data_uri_rejects_bad_base64() {
        assert!(matches!(
            Document::from_data_uri("data:application/pdf;base64,***"),
            Err(ExtractionError::MalformedDataUri(_))
        ));
    }

    #[test]
    fn test_essence_strips_parameters() {
        let doc = Document::new("Text/Plain; charset=utf-8", Bytes::new());
        assert_eq!(doc.essence(), "text/plain");
    }

    #[tokio::test]
    async fn test_local_extracts_plain_text() {
        let doc = Document::new(MEDIA_TYPE_TEXT, "Rust engineer\nSQL");
        let text = LocalTextExtractor.extract_text(&doc).await.unwrap();
        assert_eq!(text, "Rust engineer\nSQL");
    }

    #[tokio::test]
    async fn test_local_rejects_blank_text() {
        let doc = Document::new(MEDIA_TYPE_TEXT, "  \n\t ");
        assert!(matches!(
            LocalTextExtractor.extract_text(&doc).await,
            Err(ExtractionError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_local_rejects_invalid_utf8() {
        let doc = Document::new(MEDIA_TYPE_TEXT, vec![0xff, 0xfe, 0xfd]);
        assert!(matches!(
            LocalTextExtractor.extract_text(&doc).await,
            Err(ExtractionError::InvalidUtf8)
        ));
    }

    #[tokio::test]
    async fn test_local_rejects_unsupported_media_type() {
        let doc = Document::new("image/png", vec![0x89, 0x50]);
        assert!(matches!(
            LocalTextExtractor.extract_text(&doc).await,
            Err(ExtractionError::UnsupportedMediaType(t)) if t == "image/png"
        ));
    }

    #[tokio::test]
    async fn test_local_reports_broken_pdf() {
        let doc = Document::new(MEDIA_TYPE_PDF, b"not a pdf at all".to_vec());
        assert!(matches!(
            LocalTextExtractor.extract_text(&doc).await,
            Err(ExtractionError::Pdf(_))
        ));
    }
}
