//! JSON file store implementation.
//!
//! Stores analyses and proposals as JSON files under a root directory and
//! keeps small per-object meta markers (version + updated_at).

use async_trait::async_trait;
use refactorium_core::{AnalysisId, AnalysisResult, ArchitectureProposal, ProposalId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{Result, StorageError, Store};

/// File-based JSON store.
pub struct JsonStore {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    /// Create the store, creating its directories when missing.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("analyses")).await?;
        fs::create_dir_all(root.join("proposals")).await?;
        fs::create_dir_all(root.join("meta").join("analyses")).await?;
        fs::create_dir_all(root.join("meta").join("proposals")).await?;

        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn analysis_path(&self, id: &AnalysisId) -> Result<PathBuf> {
        Ok(self.root.join("analyses").join(format!("{}.json", checked_key(&id.0)?)))
    }

    fn proposal_path(&self, id: &ProposalId) -> Result<PathBuf> {
        Ok(self.root.join("proposals").join(format!("{}.json", checked_key(&id.0)?)))
    }

    fn meta_path(&self, kind: &str, id: &str) -> PathBuf {
        self.root.join("meta").join(kind).join(format!("{}.meta.json", id))
    }

    /// Stored version of an object, 0 when never written.
    pub async fn version(&self, kind: &str, id: &str) -> u64 {
        match fs::read_to_string(self.meta_path(kind, id)).await {
            Ok(s) => serde_json::from_str::<serde_json::Value>(&s)
                .ok()
                .and_then(|json| json.get("version").and_then(|v| v.as_u64()))
                .unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// Read and increment per-object version, return new version.
    async fn bump_version(&self, kind: &str, id: &str) -> Result<u64> {
        let version = self.version(kind, id).await + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(self.meta_path(kind, id), serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }

    async fn write_analysis(&self, analysis: &AnalysisResult) -> Result<()> {
        let path = self.analysis_path(&analysis.id)?;
        let json = serde_json::to_string_pretty(analysis)?;
        fs::write(&path, json.as_bytes()).await?;
        let version = self.bump_version("analyses", &analysis.id.0).await?;
        debug!("Wrote analysis {} (v{})", analysis.id, version);
        Ok(())
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn save_analysis(&self, analysis: &AnalysisResult) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_analysis(analysis).await
    }

    async fn load_analysis(&self, id: &AnalysisId) -> Result<Option<AnalysisResult>> {
        read_json(&self.analysis_path(id)?).await
    }

    async fn update_analysis(
        &self,
        id: &AnalysisId,
        update: &mut (dyn for<'a> FnMut(&'a mut AnalysisResult) + Send),
    ) -> Result<AnalysisResult> {
        let _guard = self.write_lock.lock().await;
        let mut analysis: AnalysisResult = read_json(&self.analysis_path(id)?)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        update(&mut analysis);
        self.write_analysis(&analysis).await?;
        Ok(analysis)
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisResult>> {
        let mut all: Vec<AnalysisResult> = list_dir(&self.root.join("analyses")).await?;
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn save_proposal(&self, proposal: &ArchitectureProposal) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.proposal_path(&proposal.id)?;
        let json = serde_json::to_string_pretty(proposal)?;
        fs::write(&path, json.as_bytes()).await?;
        self.bump_version("proposals", &proposal.id.0).await?;
        Ok(())
    }

    async fn load_proposal(&self, id: &ProposalId) -> Result<Option<ArchitectureProposal>> {
        read_json(&self.proposal_path(id)?).await
    }

    async fn list_proposals(&self, analysis_id: &AnalysisId) -> Result<Vec<ArchitectureProposal>> {
        let all: Vec<ArchitectureProposal> = list_dir(&self.root.join("proposals")).await?;
        let mut matching: Vec<_> = all
            .into_iter()
            .filter(|p| &p.analysis_id == analysis_id)
            .collect();
        matching.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matching)
    }
}

/// Ids become file names, so only plain names are accepted.
fn checked_key(id: &str) -> Result<&str> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(id)
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable {}: {}", entry.path().display(), e),
        }
    }
    Ok(items)
}
