//! Hosted inference backend.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::backend::{check_status, NarrativeError, Result, TextBackend};

/// Client for a hosted text-generation endpoint that takes `{inputs}` and
/// answers with `[{generated_text}]`.
#[derive(Clone)]
pub struct HostedBackend {
    client: Client,
    api_url: String,
    model: String,
    api_token: Option<String>,
}

impl HostedBackend {
    /// Create a hosted backend. The model name is appended to `api_url`.
    pub fn new(
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let api_url: String = api_url.into();
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url, self.model)
    }
}

#[async_trait]
impl TextBackend for HostedBackend {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Calling hosted model {} ({} chars)", self.model, prompt.len());

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&json!({ "inputs": prompt }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = check_status(request.send().await?).await?;

        #[derive(serde::Deserialize)]
        struct Generation {
            generated_text: String,
        }

        let generations: Vec<Generation> = response
            .json()
            .await
            .map_err(|e| NarrativeError::Malformed(e.to_string()))?;

        let text = generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(NarrativeError::Empty)?;
        if text.trim().is_empty() {
            return Err(NarrativeError::Empty);
        }
        Ok(text)
    }
}
