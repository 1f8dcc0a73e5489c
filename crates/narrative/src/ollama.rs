//! Local Ollama backend.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::backend::{check_status, NarrativeError, Result, TextBackend};

/// Ollama `/api/generate` client.
#[derive(Clone)]
pub struct OllamaBackend {
    /// HTTP client
    client: Client,

    /// Ollama server URL
    url: String,

    /// Model name
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend.
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let url: String = url.into();
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        debug!("Calling Ollama model {} ({} chars)", self.model, prompt.len());

        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response).await?;

        #[derive(serde::Deserialize)]
        struct Response {
            response: String,
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| NarrativeError::Malformed(e.to_string()))?;

        if data.response.trim().is_empty() {
            return Err(NarrativeError::Empty);
        }
        Ok(data.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::serve_once;

    fn backend(url: &str) -> OllamaBackend {
        OllamaBackend::new(url, "codellama", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_generate() {
        let (url, request) = serve_once(200, r#"{"model":"codellama","response":"Step 1: plan"}"#).await;

        let text = backend(&url).generate("migrate please").await.unwrap();
        assert_eq!(text, "Step 1: plan");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /api/generate"));
        assert!(request.contains(r#""stream":false"#));
        assert!(request.contains(r#""prompt":"migrate please""#));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (url, _request) = serve_once(500, r#"{"error":"model not found"}"#).await;
        let err = backend(&url).generate("x").await.unwrap_err();
        assert!(matches!(err, NarrativeError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_schema_mismatch() {
        let (url, _request) = serve_once(200, r#"{"done":true}"#).await;
        let err = backend(&url).generate("x").await.unwrap_err();
        assert!(matches!(err, NarrativeError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_empty_text() {
        let (url, _request) = serve_once(200, r#"{"response":"   "}"#).await;
        let err = backend(&url).generate("x").await.unwrap_err();
        assert!(matches!(err, NarrativeError::Empty));
    }
}
