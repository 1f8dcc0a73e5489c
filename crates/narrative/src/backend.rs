//! Text-generation backend abstraction.

use async_trait::async_trait;
use thiserror::Error;

/// Narrative backend errors
#[derive(Error, Debug)]
pub enum NarrativeError {
    /// Transport failure or timeout
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Response carried no text
    #[error("Empty response")]
    Empty,
}

/// Result type for narrative operations
pub type Result<T> = std::result::Result<T, NarrativeError>;

/// A service that turns a prompt into generated text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Generate text for `prompt`. One request, no retry.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Turn a non-success response into [`NarrativeError::Status`].
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body = text.chars().take(512).collect();
    Err(NarrativeError::Status { status, body })
}
