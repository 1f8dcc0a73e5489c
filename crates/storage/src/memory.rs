//! In-memory store.

use async_trait::async_trait;
use refactorium_core::{AnalysisId, AnalysisResult, ArchitectureProposal, ProposalId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Result, StorageError, Store};

/// Process-lifetime store backed by hash maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    analyses: Arc<Mutex<HashMap<AnalysisId, AnalysisResult>>>,
    proposals: Arc<Mutex<HashMap<ProposalId, ArchitectureProposal>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save_analysis(&self, analysis: &AnalysisResult) -> Result<()> {
        debug!("Saving analysis {} ({})", analysis.id, analysis.status);
        self.analyses
            .lock()
            .await
            .insert(analysis.id.clone(), analysis.clone());
        Ok(())
    }

    async fn load_analysis(&self, id: &AnalysisId) -> Result<Option<AnalysisResult>> {
        Ok(self.analyses.lock().await.get(id).cloned())
    }

    async fn update_analysis(
        &self,
        id: &AnalysisId,
        update: &mut (dyn for<'a> FnMut(&'a mut AnalysisResult) + Send),
    ) -> Result<AnalysisResult> {
        let mut analyses = self.analyses.lock().await;
        let analysis = analyses
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        update(analysis);
        Ok(analysis.clone())
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisResult>> {
        let mut all: Vec<_> = self.analyses.lock().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn save_proposal(&self, proposal: &ArchitectureProposal) -> Result<()> {
        debug!("Saving proposal {} for {}", proposal.id, proposal.analysis_id);
        self.proposals
            .lock()
            .await
            .insert(proposal.id.clone(), proposal.clone());
        Ok(())
    }

    async fn load_proposal(&self, id: &ProposalId) -> Result<Option<ArchitectureProposal>> {
        Ok(self.proposals.lock().await.get(id).cloned())
    }

    async fn list_proposals(&self, analysis_id: &AnalysisId) -> Result<Vec<ArchitectureProposal>> {
        let mut matching: Vec<_> = self
            .proposals
            .lock()
            .await
            .values()
            .filter(|p| &p.analysis_id == analysis_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matching)
    }
}
