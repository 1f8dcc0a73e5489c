//! Current-stack extraction from an analysis.

use std::collections::HashSet;

use refactorium_core::{AnalysisResult, CodeSmell, SeverityLevel, SmellKind, StackItem};

/// Hotspot path suffixes and the language they suggest.
const PATH_LANGUAGES: &[(&[&str], &str)] = &[
    (&["py"], "Python"),
    (&["js", "jsx", "ts", "tsx"], "JavaScript"),
    (&["php"], "PHP"),
    (&["java"], "Java"),
    (&["go"], "Go"),
    (&["rs"], "Rust"),
    (&["rb"], "Ruby"),
    (&["c", "cpp", "cc", "cxx", "h", "hpp"], "C/C++"),
    (&["cs"], "C#"),
    (&["swift"], "Swift"),
    (&["kt", "kts"], "Kotlin"),
    (&["hs"], "Haskell"),
    (&["zig"], "Zig"),
];

fn technology_issue(deprecated: bool, severity: SeverityLevel) -> &'static str {
    if deprecated {
        return "Deprecated and no longer maintained";
    }
    match severity {
        SeverityLevel::Cursed => "Critical security vulnerabilities or major issues",
        SeverityLevel::Haunted => "Outdated version with known issues",
        SeverityLevel::Spooky => "Minor updates available",
        SeverityLevel::Clean => "✓ Up to date",
    }
}

/// One-line summary of smell counts by severity.
pub fn summarize_smells(smells: &[CodeSmell]) -> Option<String> {
    let count = |level: SeverityLevel| smells.iter().filter(|s| s.severity == level).count();

    let parts: Vec<String> = [
        (SeverityLevel::Cursed, "critical"),
        (SeverityLevel::Haunted, "major"),
        (SeverityLevel::Spooky, "minor"),
    ]
    .into_iter()
    .filter_map(|(level, label)| {
        let n = count(level);
        (n > 0).then(|| format!("{} {}", n, label))
    })
    .collect();

    if parts.is_empty() {
        return None;
    }
    let plural = if smells.len() > 1 { "s" } else { "" };
    Some(format!("{} issue{} detected", parts.join(", "), plural))
}

/// Languages suggested by smell kinds and hotspot paths.
pub fn infer_languages(analysis: &AnalysisResult) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    let mut push = |language: &str| {
        if !languages.iter().any(|l| l == language) {
            languages.push(language.to_string());
        }
    };

    let script_smells = analysis
        .code_smells
        .iter()
        .any(|s| matches!(s.kind, SmellKind::DeprecatedSyntax | SmellKind::CallbackHell));
    if script_smells {
        push("JavaScript");
    }

    for (extensions, language) in PATH_LANGUAGES {
        let seen = analysis.cursed_files.iter().any(|hotspot| {
            hotspot
                .path
                .rsplit_once('.')
                .map(|(_, ext)| extensions.contains(&ext))
                .unwrap_or(false)
        });
        if seen {
            push(*language);
        }
    }
    languages
}

/// Build the current stack, items with a real issue first.
pub fn extract(analysis: &AnalysisResult) -> Vec<StackItem> {
    let mut stack = Vec::new();
    let mut seen = HashSet::new();

    for tech in &analysis.technologies {
        if !seen.insert(tech.name.to_lowercase()) {
            continue;
        }
        stack.push(StackItem {
            name: tech.name.clone(),
            version: tech.version.clone(),
            issue: Some(technology_issue(tech.deprecated, tech.severity).to_string()),
        });
    }

    for dep in &analysis.ghostly_dependencies {
        if !seen.insert(dep.name.to_lowercase()) {
            continue;
        }
        stack.push(StackItem {
            name: dep.name.clone(),
            version: dep.version.clone(),
            issue: Some("Deprecated dependency - should be replaced".to_string()),
        });
    }

    if let Some(summary) = summarize_smells(&analysis.code_smells) {
        stack.push(StackItem {
            name: "Code Quality".to_string(),
            version: None,
            issue: Some(summary),
        });
    }

    if stack.is_empty() {
        stack.extend(infer_languages(analysis).into_iter().map(|name| StackItem {
            name,
            version: None,
            issue: Some("Legacy patterns detected".to_string()),
        }));
    }

    if stack.is_empty() {
        stack.push(StackItem {
            name: "Legacy Code".to_string(),
            version: None,
            issue: Some("Requires modernization".to_string()),
        });
    }

    // Stable: relative order inside each group is kept.
    stack.sort_by_key(|item| !item.has_issue());
    stack
}
