//! Proposal model - current stack, target stack and migration phases.

use serde::{Deserialize, Serialize};
use crate::id::{AnalysisId, ProposalId};

/// Marker prefix for stack items without a real issue.
pub const UP_TO_DATE_MARKER: &str = "✓";

/// One entry of the current stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItem {
    /// Technology name
    pub name: String,

    /// Version, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Deficiency text, or an up-to-date marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl StackItem {
    /// Whether this item carries a real deficiency.
    pub fn has_issue(&self) -> bool {
        self.issue
            .as_deref()
            .map(|issue| !issue.starts_with(UP_TO_DATE_MARKER))
            .unwrap_or(false)
    }
}

/// Phase priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Do first
    High,
    /// Do next
    Medium,
    /// Do eventually
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// One phase of a migration plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPhase {
    /// 1-based sequence number
    pub phase: u32,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Ordered tasks
    pub tasks: Vec<String>,

    /// Priority
    pub priority: Priority,
}

/// Recognized technology ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Swift / iOS / macOS
    Swift,
    /// Python, Django, Flask, Streamlit
    Python,
    /// Kotlin
    Kotlin,
    /// Java
    Java,
    /// Go
    Go,
    /// Rust
    Rust,
    /// Ruby, Rails
    Ruby,
    /// C# / .NET
    CSharp,
    /// PHP
    Php,
    /// Electron
    Electron,
    /// JavaScript / Node.js (default)
    JavaScript,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ecosystem::Swift => "Swift",
            Ecosystem::Python => "Python",
            Ecosystem::Kotlin => "Kotlin",
            Ecosystem::Java => "Java",
            Ecosystem::Go => "Go",
            Ecosystem::Rust => "Rust",
            Ecosystem::Ruby => "Ruby",
            Ecosystem::CSharp => "C#",
            Ecosystem::Php => "PHP",
            Ecosystem::Electron => "Electron",
            Ecosystem::JavaScript => "JavaScript",
        };
        write!(f, "{}", name)
    }
}

/// Modernization proposal for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureProposal {
    /// Unique identifier
    pub id: ProposalId,

    /// Source analysis
    pub analysis_id: AnalysisId,

    /// Ecosystem branch the plan was selected from
    pub ecosystem: Ecosystem,

    /// Current stack, issues first
    pub current_stack: Vec<StackItem>,

    /// Target technology labels
    pub proposed_stack: Vec<String>,

    /// Migration narrative
    pub migration_strategy: String,

    /// Phased plan
    pub phases: Vec<MigrationPhase>,

    /// Effort bucket
    pub estimated_effort: String,
}
