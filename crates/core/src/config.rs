//! Runtime configuration.
//!
//! Values come from defaults, an optional JSON file, and environment
//! variables, in that order of increasing precedence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed environment value
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },
}

/// Which text-generation backend the narrative step talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Local Ollama instance
    Local,
    /// Hosted inference endpoint
    #[default]
    Online,
}

impl std::str::FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(DeploymentMode::Local),
            "online" => Ok(DeploymentMode::Online),
            other => Err(other.to_string()),
        }
    }
}

/// Local Ollama endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Server URL
    #[serde(default = "default_ollama_url")]
    pub url: String,

    /// Model name
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "codellama".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

/// Hosted inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedConfig {
    /// Base URL; the model name is appended
    #[serde(default = "default_hosted_url")]
    pub api_url: String,

    /// Model name
    #[serde(default = "default_hosted_model")]
    pub model: String,

    /// Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

fn default_hosted_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_hosted_model() -> String {
    "Qwen/Qwen2.5-Coder-32B-Instruct".to_string()
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            api_url: default_hosted_url(),
            model: default_hosted_model(),
            api_token: None,
        }
    }
}

/// Scan limits and bookkeeping values for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Files examined by the smell scanner and the metrics step
    #[serde(default = "default_max_scan_files")]
    pub max_scan_files: usize,

    /// Files searched per library signature
    #[serde(default = "default_max_signature_files")]
    pub max_signature_files: usize,

    /// Hotspots retained
    #[serde(default = "default_max_hotspots")]
    pub max_hotspots: usize,

    /// Line count above which a file with functions is a long-function smell
    #[serde(default = "default_long_file_lines")]
    pub long_file_lines: usize,

    /// Analysis timeout in milliseconds. Recorded, not enforced.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Result cache TTL in seconds, for external caches.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_max_scan_files() -> usize {
    100
}

fn default_max_signature_files() -> usize {
    50
}

fn default_max_hotspots() -> usize {
    20
}

fn default_long_file_lines() -> usize {
    200
}

fn default_timeout_ms() -> u64 {
    300_000
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_scan_files: default_max_scan_files(),
            max_signature_files: default_max_signature_files(),
            max_hotspots: default_max_hotspots(),
            long_file_lines: default_long_file_lines(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoriumConfig {
    /// Narrative backend selection
    #[serde(default)]
    pub deployment_mode: DeploymentMode,

    /// Local backend
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Hosted backend
    #[serde(default)]
    pub huggingface: HostedConfig,

    /// Pipeline limits
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Narrative request timeout in seconds
    #[serde(default = "default_narrative_timeout")]
    pub narrative_timeout_secs: u64,

    /// Directory for the JSON result store
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
}

fn default_narrative_timeout() -> u64 {
    60
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".refactorium")
}

impl Default for RefactoriumConfig {
    fn default() -> Self {
        Self {
            deployment_mode: DeploymentMode::default(),
            ollama: OllamaConfig::default(),
            huggingface: HostedConfig::default(),
            analysis: AnalysisConfig::default(),
            narrative_timeout_secs: default_narrative_timeout(),
            store_dir: default_store_dir(),
        }
    }
}

impl RefactoriumConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Defaults overlaid with process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay values from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("DEPLOYMENT_MODE") {
            self.deployment_mode = mode.parse().map_err(|value| ConfigError::InvalidValue {
                name: "DEPLOYMENT_MODE".to_string(),
                value,
            })?;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            self.ollama.url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.ollama.model = model;
        }
        if let Some(url) = lookup("HUGGINGFACE_API_URL") {
            self.huggingface.api_url = url;
        }
        if let Some(model) = lookup("HUGGINGFACE_MODEL") {
            self.huggingface.model = model;
        }
        if let Some(token) = lookup("HUGGINGFACE_API_TOKEN") {
            self.huggingface.api_token = Some(token);
        }
        if let Some(timeout) = lookup("ANALYSIS_TIMEOUT") {
            self.analysis.timeout_ms = parse_number("ANALYSIS_TIMEOUT", &timeout)?;
        }
        if let Some(ttl) = lookup("CACHE_TTL") {
            self.analysis.cache_ttl_secs = parse_number("CACHE_TTL", &ttl)?;
        }
        if let Some(dir) = lookup("REFACTORIUM_STORE") {
            self.store_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}
