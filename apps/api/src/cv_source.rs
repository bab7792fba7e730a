//! CV text extraction: turns a CV document reference into plain text.
//!
//! The fetch is single-shot with no timeout. A failure here is never fatal to callers:
//! `try_extract_text` logs it and reports "no text available".

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad status: {0}")]
    BadStatus(u16),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Source of plain CV text for a document URL.
#[async_trait]
pub trait CvTextSource: Send + Sync {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError>;
}

/// Downloads a PDF over http(s) and extracts its text with `pdf-extract`.
#[derive(Clone)]
pub struct HttpPdfSource {
    client: Client,
}

impl HttpPdfSource {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }
}

#[async_trait]
impl CvTextSource for HttpPdfSource {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            let scheme = url.split(':').next().unwrap_or_default().to_string();
            return Err(ExtractError::UnsupportedScheme(scheme));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::BadStatus(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        debug!("Fetched CV document: {} bytes", bytes.len());

        // PDF parsing is CPU-bound.
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await?
    }
}

/// Extracts CV text, logging and swallowing any failure.
/// Returns `None` when extraction failed; `Some("")` for a readable but empty document.
pub async fn try_extract_text(source: &dyn CvTextSource, url: &str) -> Option<String> {
    debug!("Fetching CV: {url}");
    match source.extract_text(url).await {
        Ok(text) => {
            debug!("Extracted CV text length: {}", text.len());
            Some(text)
        }
        Err(e) => {
            warn!("CV fetch/parse failed for {url}: {e}");
            None
        }
    }
}
