//! Regex-based code-smell scanner.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use refactorium_core::{AnalysisConfig, CodeSmell, SeverityLevel, SmellKind};
use tracing::{debug, warn};

use crate::walker::{line_count, read_lossy, relative_path, source_files};

static LEGACY_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvar\s+").expect("legacy declaration pattern"));

static NESTED_CALLBACKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"function\s*\([^)]*\)\s*\{\s*[^}]*function\s*\([^)]*\)\s*\{\s*[^}]*function",
    )
    .expect("nested callback pattern")
});

static FUNCTION_OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function[^{]*\{").expect("function opening pattern"));

/// Scans source files for textual anti-patterns.
pub struct SmellScanner {
    max_files: usize,
    long_file_lines: usize,
}

impl SmellScanner {
    /// Create a scanner with the given limits.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_files: config.max_scan_files,
            long_file_lines: config.long_file_lines,
        }
    }

    /// Scan the first source files under `root`.
    pub fn scan(&self, root: &Path) -> Vec<CodeSmell> {
        let mut smells = Vec::new();
        for path in source_files(root).into_iter().take(self.max_files) {
            let content = match read_lossy(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Error scanning {}: {}", path.display(), e);
                    continue;
                }
            };
            let file = relative_path(root, &path);
            let found = self.scan_content(&file, &content);
            if !found.is_empty() {
                debug!("{}: {} smell(s)", file, found.len());
            }
            smells.extend(found);
        }
        smells
    }

    /// Smells in one file's content, at most one of each kind.
    pub fn scan_content(&self, file: &str, content: &str) -> Vec<CodeSmell> {
        let mut smells = Vec::new();

        if LEGACY_DECLARATION.is_match(content) {
            smells.push(smell(
                SmellKind::DeprecatedSyntax,
                file,
                SeverityLevel::Haunted,
                "Using deprecated \"var\" keyword",
                "Replace with \"const\" or \"let\"",
            ));
        }

        if NESTED_CALLBACKS.is_match(content) {
            smells.push(smell(
                SmellKind::CallbackHell,
                file,
                SeverityLevel::Cursed,
                "Nested callbacks detected (callback hell)",
                "Refactor to use async/await",
            ));
        }

        if FUNCTION_OPENING.is_match(content) && line_count(content) > self.long_file_lines {
            smells.push(smell(
                SmellKind::LongFunction,
                file,
                SeverityLevel::Spooky,
                &format!("Function exceeds {} lines", self.long_file_lines),
                "Break into smaller functions",
            ));
        }

        smells
    }
}

fn smell(
    kind: SmellKind,
    file: &str,
    severity: SeverityLevel,
    description: &str,
    recommendation: &str,
) -> CodeSmell {
    CodeSmell {
        kind,
        file: file.to_string(),
        line: 0,
        severity,
        description: description.to_string(),
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scanner() -> SmellScanner {
        SmellScanner::new(&AnalysisConfig::default())
    }

    fn kinds(smells: &[CodeSmell]) -> Vec<SmellKind> {
        smells.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_legacy_declaration() {
        let smells = scanner().scan_content("a.js", "var a = 1;\nvar b = 2;\n");
        assert_eq!(kinds(&smells), vec![SmellKind::DeprecatedSyntax]);
        assert_eq!(smells[0].severity, SeverityLevel::Haunted);
        assert_eq!(smells[0].line, 0);
        assert_eq!(smells[0].description, "Using deprecated \"var\" keyword");
    }

    #[test]
    fn test_var_inside_identifier_is_ignored() {
        assert!(scanner().scan_content("a.js", "let covariance = 1;").is_empty());
    }

    #[test]
    fn test_nested_callbacks() {
        let code = "function(a){ function(b){ function(c){ } } }";
        let smells = scanner().scan_content("cb.js", code);
        assert_eq!(kinds(&smells), vec![SmellKind::CallbackHell]);
        assert_eq!(smells[0].severity, SeverityLevel::Cursed);
        assert_eq!(smells[0].recommendation, "Refactor to use async/await");
    }

    #[test]
    fn test_two_levels_is_not_callback_hell() {
        let code = "function(a){ function(b){ return 1; } }";
        assert!(scanner().scan_content("cb.js", code).is_empty());
    }

    #[test]
    fn test_long_function_threshold() {
        let mut code = String::from("function big() {\n");
        code.push_str(&"  x();\n".repeat(199));
        // 1 + 199 lines + trailing empty line = 201
        let smells = scanner().scan_content("big.js", &code);
        assert_eq!(kinds(&smells), vec![SmellKind::LongFunction]);
        assert_eq!(smells[0].severity, SeverityLevel::Spooky);
        assert_eq!(smells[0].description, "Function exceeds 200 lines");

        let short = "function small() {\n".to_string() + &"x();\n".repeat(198);
        assert_eq!(line_count(&short), 200);
        assert!(scanner().scan_content("small.js", &short).is_empty());
    }

    #[test]
    fn test_long_file_without_functions() {
        let code = "x = 1\n".repeat(500);
        assert!(scanner().scan_content("data.py", &code).is_empty());
    }

    #[test]
    fn test_all_kinds_in_one_file() {
        let mut code = String::from("var x = function(a){ function(b){ function(c){ } } };\n");
        code.push_str(&"\n".repeat(250));
        let smells = scanner().scan_content("legacy.js", &code);
        assert_eq!(
            kinds(&smells),
            vec![
                SmellKind::DeprecatedSyntax,
                SmellKind::CallbackHell,
                SmellKind::LongFunction
            ]
        );
    }

    #[test]
    fn test_scan_walks_tree_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/lib")).unwrap();
        fs::write(dir.path().join("src/b.js"), "var b;").unwrap();
        fs::write(dir.path().join("src/a.js"), "var a;").unwrap();
        fs::write(dir.path().join("notes.txt"), "var ignored;").unwrap();
        fs::write(dir.path().join("node_modules/lib/x.js"), "var skipped;").unwrap();

        let smells = scanner().scan(dir.path());
        let files: Vec<_> = smells.iter().map(|s| s.file.as_str()).collect();
        assert_eq!(files, vec!["src/a.js", "src/b.js"]);
    }

    #[test]
    fn test_scan_cap() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("f{}.js", i)), "var x;").unwrap();
        }
        let config = AnalysisConfig {
            max_scan_files: 2,
            ..AnalysisConfig::default()
        };
        assert_eq!(SmellScanner::new(&config).scan(dir.path()).len(), 2);
    }
}
