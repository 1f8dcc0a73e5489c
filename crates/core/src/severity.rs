//! Severity tiers and the hotspot classifier.

use serde::{Deserialize, Serialize};

/// Ordinal severity level, from healthy to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// No notable problems
    Clean,
    /// Minor problems
    Spooky,
    /// Significant problems
    Haunted,
    /// Critical problems
    Cursed,
}

impl SeverityLevel {
    /// Display label. Themed labels in spooky mode, plain labels otherwise.
    pub fn label(&self, spooky: bool) -> &'static str {
        match (self, spooky) {
            (SeverityLevel::Cursed, true) => "Cursed",
            (SeverityLevel::Haunted, true) => "Haunted",
            (SeverityLevel::Spooky, true) => "Spooky",
            (SeverityLevel::Cursed, false) => "Critical",
            (SeverityLevel::Haunted, false) => "High",
            (SeverityLevel::Spooky, false) => "Medium",
            (SeverityLevel::Clean, _) => "Clean",
        }
    }

    /// Hex color used by report renderers.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityLevel::Cursed => "#ff0000",
            SeverityLevel::Haunted => "#ff6b35",
            SeverityLevel::Spooky => "#ffa500",
            SeverityLevel::Clean => "#2dd881",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityLevel::Clean => write!(f, "clean"),
            SeverityLevel::Spooky => write!(f, "spooky"),
            SeverityLevel::Haunted => write!(f, "haunted"),
            SeverityLevel::Cursed => write!(f, "cursed"),
        }
    }
}

/// Classify a file from its issue count and heuristic complexity.
///
/// `score = issues * 2 + complexity`; tiers start at 5 (spooky), 10 (haunted)
/// and 20 (cursed), each inclusive.
pub fn classify(issue_count: u32, complexity: u32) -> SeverityLevel {
    let score = issue_count.saturating_mul(2).saturating_add(complexity);
    if score >= 20 {
        SeverityLevel::Cursed
    } else if score >= 10 {
        SeverityLevel::Haunted
    } else if score >= 5 {
        SeverityLevel::Spooky
    } else {
        SeverityLevel::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_values() {
        assert_eq!(classify(10, 10), SeverityLevel::Cursed);
        assert_eq!(classify(5, 5), SeverityLevel::Haunted);
        assert_eq!(classify(2, 3), SeverityLevel::Spooky);
        assert_eq!(classify(0, 0), SeverityLevel::Clean);
    }

    #[test]
    fn test_classify_thresholds_are_inclusive() {
        assert_eq!(classify(0, 4), SeverityLevel::Clean);
        assert_eq!(classify(0, 5), SeverityLevel::Spooky);
        assert_eq!(classify(0, 9), SeverityLevel::Spooky);
        assert_eq!(classify(5, 0), SeverityLevel::Haunted);
        assert_eq!(classify(0, 19), SeverityLevel::Haunted);
        assert_eq!(classify(10, 0), SeverityLevel::Cursed);
    }

    #[test]
    fn test_classify_is_monotonic() {
        for issues in 0..40u32 {
            for complexity in 0..60u32 {
                let base = classify(issues, complexity);
                assert!(classify(issues + 1, complexity) >= base);
                assert!(classify(issues, complexity + 1) >= base);
                assert_eq!(classify(issues, complexity), base);
            }
        }
    }

    #[test]
    fn test_classify_saturates() {
        assert_eq!(classify(u32::MAX, u32::MAX), SeverityLevel::Cursed);
    }

    #[test]
    fn test_severity_order() {
        assert!(SeverityLevel::Clean < SeverityLevel::Spooky);
        assert!(SeverityLevel::Spooky < SeverityLevel::Haunted);
        assert!(SeverityLevel::Haunted < SeverityLevel::Cursed);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(SeverityLevel::Cursed.label(true), "Cursed");
        assert_eq!(SeverityLevel::Haunted.label(false), "High");
        assert_eq!(SeverityLevel::Spooky.label(false), "Medium");
        assert_eq!(SeverityLevel::Clean.label(true), "Clean");
        assert_eq!(SeverityLevel::Haunted.color(), "#ff6b35");
        assert_eq!(SeverityLevel::Clean.color(), "#2dd881");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&SeverityLevel::Cursed).unwrap();
        assert_eq!(json, "\"cursed\"");
        let level: SeverityLevel = serde_json::from_str("\"spooky\"").unwrap();
        assert_eq!(level, SeverityLevel::Spooky);
    }
}
