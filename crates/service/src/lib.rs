//! Refactorium service layer.
//!
//! Ties the analysis pipeline, proposal generation and scaffolding to a
//! [`Store`](refactorium_storage::Store).

#![warn(missing_docs)]

pub mod service;

pub use service::{AnalysisService, Result, ServiceError, StartedAnalysis};
