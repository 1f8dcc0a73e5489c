//! Effort bucket estimation.

use refactorium_core::CodeMetrics;

/// Effort bucket from file count and debt score.
pub fn estimate(metrics: &CodeMetrics) -> &'static str {
    let files = metrics.total_files;
    let debt = metrics.technical_debt_score;
    if files < 50 && debt < 30 {
        "2-4 weeks"
    } else if files < 200 && debt < 60 {
        "1-3 months"
    } else {
        "3-6 months"
    }
}
