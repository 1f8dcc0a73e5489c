//! Keyword-count complexity estimate.

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound of the estimate.
pub const MAX_COMPLEXITY: u32 = 50;

static CONTROL_FLOW: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\bif\b", r"\bfor\b", r"\bwhile\b", r"\bswitch\b", r"\bcatch\b"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("control-flow pattern"))
        .collect()
});

/// Approximate cyclomatic complexity: 1 plus every whole-word `if`, `for`,
/// `while`, `switch` and `catch`, capped at [`MAX_COMPLEXITY`].
pub fn complexity(content: &str) -> u32 {
    let mut total: u32 = 1;
    for pattern in CONTROL_FLOW.iter() {
        let count = pattern.find_iter(content).count();
        total = total.saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
        if total >= MAX_COMPLEXITY {
            return MAX_COMPLEXITY;
        }
    }
    total
}
