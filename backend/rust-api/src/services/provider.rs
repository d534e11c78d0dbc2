use async_trait::async_trait;

use crate::models::Selection;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to language model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language model returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("language model response had no text: {0}")]
    EmptyResponse(String),
    #[error("language model unavailable: {0}")]
    Unavailable(String),
}

/// Source of lesson text and raw quiz payloads.
///
/// Implementations are opaque: output may be malformed and calls may fail.
/// Callers go through [`super::content_service::ContentService`], which never
/// lets an error escape.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Lesson body, expected to be Markdown (possibly with LaTeX).
    async fn generate_lesson(&self, selection: &Selection) -> Result<String, ProviderError>;

    /// Quiz payload as text: JSON, optionally wrapped in code fences.
    async fn generate_quiz_raw(&self, selection: &Selection) -> Result<String, ProviderError>;
}
