//! Unique identifiers for Refactorium entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifier of an ingested source tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodebaseId(pub String);

impl CodebaseId {
    /// Generate a new CodebaseId
    pub fn new() -> Self {
        Self(Ulid::new().to_string().to_lowercase())
    }
}

impl Default for CodebaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CodebaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CodebaseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl AnalysisId {
    /// Generate a new AnalysisId
    pub fn new() -> Self {
        Self(format!("analysis_{}", Ulid::new()))
    }

    /// Analysis id derived from the codebase it belongs to.
    pub fn for_codebase(codebase: &CodebaseId) -> Self {
        Self(format!("analysis_{}", codebase))
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AnalysisId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Identifier of an architecture proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub String);

impl ProposalId {
    /// Generate a new ProposalId
    pub fn new() -> Self {
        Self(format!("arch_{}", Ulid::new()))
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProposalId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
