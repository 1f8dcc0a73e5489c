//! Store trait abstraction.

use async_trait::async_trait;
use refactorium_core::{AnalysisId, AnalysisResult, ArchitectureProposal, ProposalId};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Id that cannot be used as a storage key
    #[error("Invalid id: {0}")]
    InvalidId(String),
}

/// Keyed store for analyses and proposals.
///
/// Implementations use interior mutability so one store can be shared
/// between a request handler and the background analysis run it spawned.
#[async_trait]
pub trait Store: Send + Sync {
    // === Analysis operations ===

    /// Save an analysis (create or overwrite).
    async fn save_analysis(&self, analysis: &AnalysisResult) -> Result<()>;

    /// Load an analysis by ID.
    async fn load_analysis(&self, id: &AnalysisId) -> Result<Option<AnalysisResult>>;

    /// Apply `update` to a stored analysis and return the new value.
    ///
    /// Fails with [`StorageError::NotFound`] when the id is unknown.
    async fn update_analysis(
        &self,
        id: &AnalysisId,
        update: &mut (dyn for<'a> FnMut(&'a mut AnalysisResult) + Send),
    ) -> Result<AnalysisResult>;

    /// List all analyses, oldest first.
    async fn list_analyses(&self) -> Result<Vec<AnalysisResult>>;

    // === Proposal operations ===

    /// Save a proposal (create or overwrite).
    async fn save_proposal(&self, proposal: &ArchitectureProposal) -> Result<()>;

    /// Load a proposal by ID.
    async fn load_proposal(&self, id: &ProposalId) -> Result<Option<ArchitectureProposal>>;

    /// List proposals generated from one analysis.
    async fn list_proposals(&self, analysis_id: &AnalysisId) -> Result<Vec<ArchitectureProposal>>;
}
