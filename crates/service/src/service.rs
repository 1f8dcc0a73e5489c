//! Analysis lifecycle over a result store.
//!
//! An analysis is stored as an `analyzing` placeholder first, then
//! overwritten with the complete result, or marked failed with the error
//! message. Callers poll the store for the transition.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use refactorium_analysis::Analyzer;
use refactorium_core::{
    AnalysisConfig, AnalysisId, AnalysisResult, AnalysisStatus, ArchitectureProposal, CodebaseId,
    ProposalId, RefactoriumConfig,
};
use refactorium_generation::{scaffold, ProposalGenerator, Scaffold, ScaffoldError};
use refactorium_narrative::Narrator;
use refactorium_storage::{StorageError, Store};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Service errors
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Unknown analysis or proposal id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Analysis has not completed
    #[error("Analysis {id} is {status}, not complete")]
    NotReady {
        /// Analysis id
        id: AnalysisId,
        /// Current status
        status: AnalysisStatus,
    },

    /// Scaffold generation failed
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Ids handed back when an analysis is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedAnalysis {
    /// Analysis id to poll
    pub analysis_id: AnalysisId,
    /// Codebase the analysis belongs to
    pub codebase_id: CodebaseId,
}

/// Entry point for analyses, proposals and scaffolds.
pub struct AnalysisService<S: Store + 'static> {
    store: Arc<S>,
    analyzer: Arc<Analyzer>,
    generator: ProposalGenerator,
    poll_interval: Duration,
}

impl<S: Store + 'static> Clone for AnalysisService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            analyzer: Arc::clone(&self.analyzer),
            generator: self.generator.clone(),
            poll_interval: self.poll_interval,
        }
    }
}

impl<S: Store + 'static> AnalysisService<S> {
    /// Create a service with the narrative backend chosen by `config`.
    pub fn new(store: Arc<S>, config: &RefactoriumConfig) -> Self {
        Self::with_narrator(store, config.analysis.clone(), Narrator::from_config(config))
    }

    /// Create a service with an explicit narrator.
    pub fn with_narrator(store: Arc<S>, analysis: AnalysisConfig, narrator: Narrator) -> Self {
        Self {
            store,
            analyzer: Arc::new(Analyzer::new(analysis)),
            generator: ProposalGenerator::new(narrator),
            poll_interval: Duration::from_millis(50),
        }
    }

    /// Accept an analysis of `root` for `codebase_id` and run it in the
    /// background.
    ///
    /// The result is stored under `analysis_id`, or under the id derived
    /// from the codebase when none is given. Returns once the placeholder is
    /// stored. The join handle resolves to the final stored state.
    pub async fn start_analysis(
        &self,
        codebase_id: CodebaseId,
        analysis_id: Option<AnalysisId>,
        root: impl Into<PathBuf>,
    ) -> Result<(StartedAnalysis, JoinHandle<AnalysisResult>)> {
        let root = root.into();
        let placeholder = self.store_placeholder(codebase_id, analysis_id).await?;
        let started = StartedAnalysis {
            analysis_id: placeholder.id.clone(),
            codebase_id: placeholder.codebase_id.clone(),
        };

        let service = self.clone();
        let handle = tokio::spawn(async move { service.run(placeholder, root).await });

        info!("Accepted analysis {}", started.analysis_id);
        Ok((started, handle))
    }

    /// Analyze `root` for `codebase_id` and wait for the final stored state.
    pub async fn analyze_now(
        &self,
        codebase_id: CodebaseId,
        analysis_id: Option<AnalysisId>,
        root: impl Into<PathBuf>,
    ) -> Result<AnalysisResult> {
        let placeholder = self.store_placeholder(codebase_id, analysis_id).await?;
        Ok(self.run(placeholder, root.into()).await)
    }

    async fn store_placeholder(
        &self,
        codebase_id: CodebaseId,
        analysis_id: Option<AnalysisId>,
    ) -> Result<AnalysisResult> {
        let id = analysis_id.unwrap_or_else(|| AnalysisId::for_codebase(&codebase_id));
        let placeholder = AnalysisResult::placeholder(id, codebase_id);
        self.store.save_analysis(&placeholder).await?;
        Ok(placeholder)
    }

    /// Run the pipeline for a stored placeholder and persist the outcome.
    async fn run(&self, placeholder: AnalysisResult, root: PathBuf) -> AnalysisResult {
        let analyzer = Arc::clone(&self.analyzer);
        let id = placeholder.id.clone();
        let codebase_id = placeholder.codebase_id.clone();

        let outcome = tokio::task::spawn_blocking(move || analyzer.analyze_as(id, codebase_id, &root)).await;

        let message = match outcome {
            Ok(Ok(mut result)) => {
                result.created_at = placeholder.created_at;
                match self.store.save_analysis(&result).await {
                    Ok(()) => {
                        info!("Analysis {} stored", result.id);
                        return result;
                    }
                    Err(e) => format!("Failed to store analysis: {}", e),
                }
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("Analysis task failed: {}", e),
        };

        error!("Analysis {} failed: {}", placeholder.id, message);
        let mut update = |analysis: &mut AnalysisResult| analysis.fail(message.clone());
        let stored = self.store.update_analysis(&placeholder.id, &mut update).await;
        match stored {
            Ok(failed) => failed,
            Err(e) => {
                error!("Could not mark analysis {} failed: {}", placeholder.id, e);
                let mut failed = placeholder;
                failed.fail(message);
                failed
            }
        }
    }

    /// Stored state of an analysis.
    pub async fn get_analysis(&self, id: &AnalysisId) -> Result<AnalysisResult> {
        self.store
            .load_analysis(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Stored analyses, oldest first.
    pub async fn list_analyses(&self) -> Result<Vec<AnalysisResult>> {
        Ok(self.store.list_analyses().await?)
    }

    /// Poll until the analysis is complete or failed.
    ///
    /// Returns `None` if `timeout` elapses first.
    pub async fn wait_for_completion(
        &self,
        id: &AnalysisId,
        timeout: Duration,
    ) -> Result<Option<AnalysisResult>> {
        let start = Instant::now();
        loop {
            let analysis = self.get_analysis(id).await?;
            if analysis.status.is_terminal() {
                return Ok(Some(analysis));
            }
            if start.elapsed() >= timeout {
                debug!("Timed out waiting for analysis {}", id);
                return Ok(None);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Generate and store a proposal for a complete analysis.
    pub async fn create_proposal(&self, analysis_id: &AnalysisId) -> Result<ArchitectureProposal> {
        let analysis = self.get_analysis(analysis_id).await?;
        if analysis.status != AnalysisStatus::Complete {
            return Err(ServiceError::NotReady {
                id: analysis.id,
                status: analysis.status,
            });
        }
        let proposal = self.generator.generate(&analysis).await;
        self.store.save_proposal(&proposal).await?;
        Ok(proposal)
    }

    /// Stored proposal.
    pub async fn get_proposal(&self, id: &ProposalId) -> Result<ArchitectureProposal> {
        self.store
            .load_proposal(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Stored proposals generated from one analysis.
    pub async fn list_proposals(&self, analysis_id: &AnalysisId) -> Result<Vec<ArchitectureProposal>> {
        Ok(self.store.list_proposals(analysis_id).await?)
    }

    /// Starter skeleton for a stored proposal.
    pub async fn scaffold(&self, proposal_id: &ProposalId) -> Result<Scaffold> {
        let proposal = self.get_proposal(proposal_id).await?;
        Ok(scaffold::generate(&proposal)?)
    }
}
