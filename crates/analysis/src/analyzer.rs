//! Analysis orchestration.

use std::path::{Path, PathBuf};

use refactorium_core::{
    AnalysisConfig, AnalysisId, AnalysisResult, AnalysisStatus, CodebaseId, DetectedTechnology,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::detector::TechnologyDetector;
use crate::hotspots;
use crate::metrics;
use crate::smells::SmellScanner;
use crate::walker::source_files;

/// Analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Root is missing or not a directory
    #[error("Codebase root not found: {0}")]
    RootNotFound(PathBuf),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension to language display name.
const LANGUAGES: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("py", "Python"),
    ("php", "PHP"),
    ("java", "Java"),
    ("rb", "Ruby"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("c", "C"),
    ("cpp", "C++"),
    ("cs", "C#"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
];

/// Language name for a source path, when the extension maps to one.
pub fn language_of(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    LANGUAGES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, language)| *language)
}

/// Runs the full pipeline over one source tree.
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyze `root` under a fresh analysis id.
    pub fn analyze(&self, codebase_id: CodebaseId, root: &Path) -> Result<AnalysisResult> {
        self.analyze_as(AnalysisId::new(), codebase_id, root)
    }

    /// Analyze `root`, recording the result under `id`.
    pub fn analyze_as(
        &self,
        id: AnalysisId,
        codebase_id: CodebaseId,
        root: &Path,
    ) -> Result<AnalysisResult> {
        if !root.is_dir() {
            return Err(AnalysisError::RootNotFound(root.to_path_buf()));
        }
        info!("Analyzing {} ({})", root.display(), id);

        let mut result = AnalysisResult::placeholder(id, codebase_id);

        let mut technologies = TechnologyDetector::new(&self.config).detect(root);
        debug!("Detected {} technologies", technologies.len());

        let smells = SmellScanner::new(&self.config).scan(root);
        debug!("Found {} code smells", smells.len());

        let cursed_files = hotspots::aggregate(root, &smells, self.config.max_hotspots);
        let metrics = metrics::compute(root, smells.len(), self.config.max_scan_files);

        for language in tally_languages(root) {
            let known = technologies
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(language));
            if !known {
                technologies.push(DetectedTechnology::clean(language));
            }
        }

        result.ghostly_dependencies = technologies
            .iter()
            .filter(|t| t.deprecated)
            .cloned()
            .collect();
        result.technologies = technologies;
        result.code_smells = smells;
        result.cursed_files = cursed_files;
        result.metrics = metrics;
        result.status = AnalysisStatus::Complete;
        result.progress = 100;
        result.completed_at = Some(chrono::Utc::now());

        info!(
            "Analysis {} complete: debt score {}, {} hotspots",
            result.id,
            result.metrics.technical_debt_score,
            result.cursed_files.len()
        );
        Ok(result)
    }
}

/// Languages seen in the tree, in first-seen walk order.
fn tally_languages(root: &Path) -> Vec<&'static str> {
    let mut languages = Vec::new();
    for path in source_files(root) {
        if let Some(language) = language_of(&path) {
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
    }
    languages
}
