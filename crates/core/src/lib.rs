//! Refactorium core data models.
//!
//! This crate defines the data structures shared by the detection,
//! scoring and modernization-planning pipeline.

#![warn(missing_docs)]

// Identities
mod id;

// Scoring
mod severity;

// Analysis output
mod analysis;

// Modernization plan
mod proposal;

// Configuration
pub mod config;

// Re-exports
pub use id::*;

pub use severity::{classify, SeverityLevel};
pub use analysis::{
    AnalysisResult, AnalysisStatus, CodeMetrics, CodeSmell, DetectedTechnology, FileHotspot,
    SmellKind,
};
pub use proposal::{
    ArchitectureProposal, Ecosystem, MigrationPhase, Priority, StackItem, UP_TO_DATE_MARKER,
};
pub use config::{
    AnalysisConfig, ConfigError, DeploymentMode, HostedConfig, OllamaConfig, RefactoriumConfig,
};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
