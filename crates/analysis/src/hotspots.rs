//! Hotspot aggregation over smell findings.

use std::path::Path;

use refactorium_core::{classify, CodeSmell, FileHotspot};
use tracing::warn;

use crate::complexity::complexity;
use crate::walker::{line_count, read_lossy};

/// Group `smells` by file and rank the files by issue count.
///
/// Files keep their first-appearance order among equal issue counts.
/// Files that can no longer be read are dropped. At most `limit` entries
/// are returned.
pub fn aggregate(root: &Path, smells: &[CodeSmell], limit: usize) -> Vec<FileHotspot> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for smell in smells {
        match counts.iter_mut().find(|(file, _)| *file == smell.file) {
            Some((_, count)) => *count += 1,
            None => counts.push((smell.file.as_str(), 1)),
        }
    }

    let mut hotspots: Vec<FileHotspot> = counts
        .into_iter()
        .filter_map(|(file, issues)| {
            let content = match read_lossy(&root.join(file)) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Dropping hotspot {}: {}", file, e);
                    return None;
                }
            };
            let complexity = complexity(&content);
            Some(FileHotspot {
                path: file.to_string(),
                severity: classify(issues, complexity),
                issues,
                complexity,
                lines: u32::try_from(line_count(&content)).unwrap_or(u32::MAX),
            })
        })
        .collect();

    hotspots.sort_by(|a, b| b.issues.cmp(&a.issues));
    hotspots.truncate(limit);
    hotspots
}
