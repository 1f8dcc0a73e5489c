//! Analysis model - technologies, smells, hotspots and metrics.

use serde::{Deserialize, Serialize};
use crate::id::{AnalysisId, CodebaseId};
use crate::severity::SeverityLevel;
use crate::Time;

/// A technology found in the scanned tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTechnology {
    /// Package, framework or language name
    pub name: String,

    /// Declared or pinned version, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// On the deprecation deny-list
    pub deprecated: bool,

    /// Last upstream release, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<Time>,

    /// Severity tier from the technology deny-list
    pub severity: SeverityLevel,
}

impl DetectedTechnology {
    /// A clean, non-deprecated entry.
    pub fn clean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            deprecated: false,
            last_update: None,
            severity: SeverityLevel::Clean,
        }
    }
}

/// Kind of textual anti-pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmellKind {
    /// Legacy mutable declaration keyword
    DeprecatedSyntax,
    /// Nested anonymous callbacks
    CallbackHell,
    /// Oversized file containing functions
    LongFunction,
}

impl std::fmt::Display for SmellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmellKind::DeprecatedSyntax => write!(f, "deprecated-syntax"),
            SmellKind::CallbackHell => write!(f, "callback-hell"),
            SmellKind::LongFunction => write!(f, "long-function"),
        }
    }
}

/// A code smell finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSmell {
    /// Smell kind
    #[serde(rename = "type")]
    pub kind: SmellKind,

    /// Path relative to the scanned root
    pub file: String,

    /// Best-effort line, 0 means the whole file
    pub line: u32,

    /// Severity
    pub severity: SeverityLevel,

    /// What was found
    pub description: String,

    /// How to fix it
    pub recommendation: String,
}

/// A file ranked by aggregated smells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHotspot {
    /// Path relative to the scanned root
    pub path: String,

    /// Severity from issue count and complexity
    pub severity: SeverityLevel,

    /// Number of smells attributed to the file
    pub issues: u32,

    /// Heuristic complexity, 1..=50
    pub complexity: u32,

    /// Line count
    pub lines: u32,
}

/// Aggregate totals for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetrics {
    /// Source files discovered
    pub total_files: u32,

    /// Lines across the sampled files
    pub total_lines: u64,

    /// Rounded average complexity of the sample
    pub avg_complexity: u32,

    /// Test coverage, when a collaborator supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_coverage: Option<f64>,

    /// Debt score, 0..=100
    pub technical_debt_score: u32,
}

/// Analysis lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// Accepted, not started
    Pending,
    /// Running
    Analyzing,
    /// Finished successfully
    Complete,
    /// Finished with an error
    Failed,
}

impl AnalysisStatus {
    /// Whether the analysis reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Complete | AnalysisStatus::Failed)
    }
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Pending => write!(f, "pending"),
            AnalysisStatus::Analyzing => write!(f, "analyzing"),
            AnalysisStatus::Complete => write!(f, "complete"),
            AnalysisStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Structured result of analyzing one source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Unique identifier
    pub id: AnalysisId,

    /// Codebase this analysis belongs to
    pub codebase_id: CodebaseId,

    /// Lifecycle state
    pub status: AnalysisStatus,

    /// Progress percentage, 0 or 100
    pub progress: u8,

    /// Detected technologies
    pub technologies: Vec<DetectedTechnology>,

    /// Smell findings
    pub code_smells: Vec<CodeSmell>,

    /// Ranked hotspots
    pub cursed_files: Vec<FileHotspot>,

    /// Deprecated subset of `technologies`
    pub ghostly_dependencies: Vec<DetectedTechnology>,

    /// Aggregate metrics
    pub metrics: CodeMetrics,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the analysis was requested
    pub created_at: Time,

    /// When the analysis finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Time>,
}

impl AnalysisResult {
    /// Empty entry in the analyzing state, stored before the run starts.
    pub fn placeholder(id: AnalysisId, codebase_id: CodebaseId) -> Self {
        Self {
            id,
            codebase_id,
            status: AnalysisStatus::Analyzing,
            progress: 0,
            technologies: Vec::new(),
            code_smells: Vec::new(),
            cursed_files: Vec::new(),
            ghostly_dependencies: Vec::new(),
            metrics: CodeMetrics::default(),
            error: None,
            created_at: chrono::Utc::now(),
            completed_at: None,
        }
    }

    /// Mark as failed. Progress stays where it was.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = AnalysisStatus::Failed;
        self.error = Some(message.into());
        self.completed_at = Some(chrono::Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_analyzing() {
        let result = AnalysisResult::placeholder(AnalysisId::new(), CodebaseId::new());
        assert_eq!(result.status, AnalysisStatus::Analyzing);
        assert_eq!(result.progress, 0);
        assert!(result.technologies.is_empty());
        assert!(result.completed_at.is_none());
    }

    #[test]
    fn test_fail_keeps_progress() {
        let mut result = AnalysisResult::placeholder(AnalysisId::new(), CodebaseId::new());
        result.fail("root missing");
        assert_eq!(result.status, AnalysisStatus::Failed);
        assert_eq!(result.progress, 0);
        assert_eq!(result.error.as_deref(), Some("root missing"));
        assert!(result.status.is_terminal());
    }

    #[test]
    fn test_json_field_names() {
        let result = AnalysisResult::placeholder(AnalysisId("analysis_x".into()), CodebaseId::from("c"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["codebaseId"], "c");
        assert_eq!(json["status"], "analyzing");
        assert!(json.get("cursedFiles").is_some());
        assert!(json.get("ghostlyDependencies").is_some());
        assert_eq!(json["metrics"]["technicalDebtScore"], 0);
    }

    #[test]
    fn test_smell_kind_serializes_kebab_case() {
        let smell = CodeSmell {
            kind: SmellKind::CallbackHell,
            file: "a.js".to_string(),
            line: 0,
            severity: SeverityLevel::Cursed,
            description: String::new(),
            recommendation: String::new(),
        };
        let json = serde_json::to_value(&smell).unwrap();
        assert_eq!(json["type"], "callback-hell");
        assert_eq!(SmellKind::DeprecatedSyntax.to_string(), "deprecated-syntax");
    }
}
