//! Aggregate code metrics.

use std::path::Path;

use refactorium_core::CodeMetrics;
use tracing::{debug, warn};

use crate::complexity::complexity;
use crate::walker::{line_count, read_lossy, source_files};

/// Upper bound of the debt score.
pub const MAX_DEBT_SCORE: u32 = 100;

/// Technical debt score: two points per smell plus the average complexity,
/// capped at [`MAX_DEBT_SCORE`].
pub fn debt_score(smell_count: usize, avg_complexity: f64) -> u32 {
    let raw = (smell_count as f64) * 2.0 + avg_complexity;
    raw.round().clamp(0.0, MAX_DEBT_SCORE as f64) as u32
}

/// Compute metrics over the source tree under `root`.
///
/// `total_files` counts every discovered source file. Lines and complexity
/// come from the readable files among the first `sample_size`.
pub fn compute(root: &Path, smell_count: usize, sample_size: usize) -> CodeMetrics {
    let files = source_files(root);

    let mut total_lines: u64 = 0;
    let mut total_complexity: u64 = 0;
    let mut readable: u64 = 0;

    for path in files.iter().take(sample_size) {
        match read_lossy(path) {
            Ok(content) => {
                total_lines += line_count(&content) as u64;
                total_complexity += u64::from(complexity(&content));
                readable += 1;
            }
            Err(e) => warn!("Error reading {}: {}", path.display(), e),
        }
    }

    let avg = if readable == 0 {
        0.0
    } else {
        total_complexity as f64 / readable as f64
    };

    let metrics = CodeMetrics {
        total_files: u32::try_from(files.len()).unwrap_or(u32::MAX),
        total_lines,
        avg_complexity: avg.round() as u32,
        test_coverage: None,
        technical_debt_score: debt_score(smell_count, avg),
    };
    debug!(
        "Metrics: {} files, {} lines, avg complexity {}, debt {}",
        metrics.total_files, metrics.total_lines, metrics.avg_complexity, metrics.technical_debt_score
    );
    metrics
}
