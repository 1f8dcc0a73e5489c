//! Migration narratives.
//!
//! Asks a text-generation backend (local Ollama or a hosted inference
//! endpoint) for prose, and falls back to deterministic templates when the
//! backend is absent or fails.

#![warn(missing_docs)]

pub mod backend;
pub mod hosted;
pub mod narrator;
pub mod ollama;
pub mod templates;

#[cfg(test)]
mod stub;

pub use backend::{NarrativeError, Result, TextBackend};
pub use hosted::HostedBackend;
pub use narrator::Narrator;
pub use ollama::OllamaBackend;
pub use templates::{migration_guide, GENERIC_GUIDE, GENERIC_SUMMARY};
