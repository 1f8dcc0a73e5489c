//! Codebase analysis pipeline.
//!
//! Walks a source tree, detects technologies, scans for code smells,
//! ranks hotspots and aggregates debt metrics.

#![warn(missing_docs)]

pub mod walker;
pub mod complexity;
pub mod detector;
pub mod smells;
pub mod hotspots;
pub mod metrics;
pub mod analyzer;

pub use analyzer::{language_of, AnalysisError, Analyzer, Result};
pub use complexity::{complexity, MAX_COMPLEXITY};
pub use detector::TechnologyDetector;
pub use smells::SmellScanner;
