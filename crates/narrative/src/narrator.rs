//! Narrative generation with deterministic fallback.

use refactorium_core::{DeploymentMode, RefactoriumConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::TextBackend;
use crate::hosted::HostedBackend;
use crate::ollama::OllamaBackend;
use crate::templates::{migration_guide, GENERIC_SUMMARY};

/// Produces migration guides and architecture summaries.
///
/// Each call makes at most one backend request. Any backend failure is
/// logged and replaced by template text, so neither method can fail.
#[derive(Clone, Default)]
pub struct Narrator {
    backend: Option<Arc<dyn TextBackend>>,
}

impl Narrator {
    /// Narrator over an explicit backend.
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Template-only narrator.
    pub fn offline() -> Self {
        Self { backend: None }
    }

    /// Select the backend from the deployment mode.
    ///
    /// Online mode without an API token stays template-only.
    pub fn from_config(config: &RefactoriumConfig) -> Self {
        let timeout = Duration::from_secs(config.narrative_timeout_secs);
        match config.deployment_mode {
            DeploymentMode::Local => Self::new(Arc::new(OllamaBackend::new(
                config.ollama.url.clone(),
                config.ollama.model.clone(),
                timeout,
            ))),
            DeploymentMode::Online => match &config.huggingface.api_token {
                Some(token) => Self::new(Arc::new(HostedBackend::new(
                    config.huggingface.api_url.clone(),
                    config.huggingface.model.clone(),
                    Some(token.clone()),
                    timeout,
                ))),
                None => {
                    debug!("No hosted API token configured, using templates");
                    Self::offline()
                }
            },
        }
    }

    /// Whether a backend is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Migration guide from the current stack to the proposed stack.
    pub async fn narrate(&self, current: &[String], proposed: &[String]) -> String {
        let prompt = format!(
            "Create a migration guide from {} to {}. Include step-by-step instructions and best practices.",
            current.join(", "),
            proposed.join(", ")
        );
        match self.ask(&prompt).await {
            Some(text) => text,
            None => migration_guide(current, proposed),
        }
    }

    /// Architecture proposal for an analysis summary.
    pub async fn summarize(&self, analysis: &str) -> String {
        let prompt = format!(
            "Based on this code analysis, propose a modern architecture:\n\n{}\n\nProvide a detailed architecture proposal with recommended technologies and migration strategy.",
            analysis
        );
        match self.ask(&prompt).await {
            Some(text) => text,
            None => GENERIC_SUMMARY.to_string(),
        }
    }

    async fn ask(&self, prompt: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!("{} backend returned no text, using template", backend.name());
                None
            }
            Err(e) => {
                warn!("{} backend failed, using template: {}", backend.name(), e);
                None
            }
        }
    }
}
