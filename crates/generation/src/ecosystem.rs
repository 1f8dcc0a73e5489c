//! Ecosystem classification of a current-stack keyword list.
//!
//! The predicates are evaluated in a fixed order and the first match wins.
//! Both the proposed-stack table and the phase catalog are keyed by the
//! result, so the two can never disagree.

use refactorium_core::Ecosystem;

/// Lowercased view of a keyword list.
#[derive(Debug, Clone)]
pub struct StackKeywords {
    text: String,
    words: Vec<String>,
}

impl StackKeywords {
    /// Build from raw keywords.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let text = keywords
            .iter()
            .map(|k| k.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let words = text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string())
            .collect();
        Self { text, words }
    }

    /// Substring test on the joined text.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Whether any substring in `needles` occurs.
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }

    /// Whole-word test.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    fn mentions_java(&self) -> bool {
        self.text.replace("javascript", " ").contains("java")
    }
}

type Predicate = fn(&StackKeywords) -> bool;

/// Ordered (predicate, ecosystem) table.
const RULES: &[(Predicate, Ecosystem)] = &[
    (|k| k.contains("swift"), Ecosystem::Swift),
    (
        |k| k.contains_any(&["python", "django", "flask", "streamlit"]),
        Ecosystem::Python,
    ),
    (|k| k.contains("kotlin"), Ecosystem::Kotlin),
    (StackKeywords::mentions_java, Ecosystem::Java),
    (|k| k.has_word("go") || k.contains("golang"), Ecosystem::Go),
    (|k| k.has_word("rust"), Ecosystem::Rust),
    (|k| k.contains_any(&["ruby", "rails"]), Ecosystem::Ruby),
    (|k| k.contains_any(&["c#", "csharp", ".net"]), Ecosystem::CSharp),
    (|k| k.contains("php"), Ecosystem::Php),
    (|k| k.contains("electron"), Ecosystem::Electron),
];

/// Classify keywords. JavaScript is the default.
pub fn classify_keywords(keywords: &StackKeywords) -> Ecosystem {
    RULES
        .iter()
        .find(|(matches, _)| matches(keywords))
        .map(|(_, ecosystem)| *ecosystem)
        .unwrap_or(Ecosystem::JavaScript)
}

/// Classify a raw keyword list.
pub fn classify_stack<S: AsRef<str>>(keywords: &[S]) -> Ecosystem {
    classify_keywords(&StackKeywords::new(keywords))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(classify_stack(&["Java"]), Ecosystem::Java);
        assert_eq!(classify_stack(&["Django", "celery"]), Ecosystem::Python);
        assert_eq!(classify_stack(&["Swift"]), Ecosystem::Swift);
        assert_eq!(classify_stack(&["Kotlin", "Java"]), Ecosystem::Kotlin);
        assert_eq!(classify_stack(&["Go"]), Ecosystem::Go);
        assert_eq!(classify_stack(&["golang.org/x/net"]), Ecosystem::Go);
        assert_eq!(classify_stack(&["Rust"]), Ecosystem::Rust);
        assert_eq!(classify_stack(&["rails"]), Ecosystem::Ruby);
        assert_eq!(classify_stack(&["C#"]), Ecosystem::CSharp);
        assert_eq!(classify_stack(&["PHP"]), Ecosystem::Php);
        assert_eq!(classify_stack(&["electron", "jquery"]), Ecosystem::Electron);
        assert_eq!(classify_stack(&["jquery", "express"]), Ecosystem::JavaScript);
    }

    #[test]
    fn test_no_false_substring_matches() {
        assert_eq!(classify_stack(&["JavaScript"]), Ecosystem::JavaScript);
        assert_eq!(classify_stack(&["mongoose", "cargo-cult"]), Ecosystem::JavaScript);
        assert_eq!(classify_stack(&["trustjs"]), Ecosystem::JavaScript);
        assert_eq!(classify_stack(&["JavaScript", "Java"]), Ecosystem::Java);
    }

    #[test]
    fn test_empty_defaults_to_javascript() {
        let empty: [&str; 0] = [];
        assert_eq!(classify_stack(&empty), Ecosystem::JavaScript);
    }

    #[test]
    fn test_keywords() {
        let k = StackKeywords::new(&["Node.js", "Go 1.22"]);
        assert!(k.contains("node.js"));
        assert!(k.has_word("go"));
        assert!(k.has_word("node"));
        assert!(!k.has_word("no"));
    }
}
