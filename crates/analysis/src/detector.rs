//! Technology detection from manifests, runtime pins and source signatures.
//!
//! Each source is consulted independently. A missing or malformed file
//! contributes nothing; detection never fails.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use refactorium_core::{AnalysisConfig, DetectedTechnology, SeverityLevel};
use tracing::{debug, warn};

use crate::walker::{files_with_extensions, read_lossy, SCRIPT_EXTENSIONS};

/// Names flagged as deprecated.
const DEPRECATED: &[&str] = &[
    "bower", "grunt", "gulp", "tslint", "moment", "request", "jquery", "nose", "pycrypto",
];

/// Names in the cursed tier.
const CURSED: &[&str] = &["jquery", "bower", "tslint", "pycrypto"];

/// Names in the haunted tier.
const HAUNTED: &[&str] = &["moment", "request", "grunt", "gulp", "nose"];

/// String literals in descriptor files that are never package names.
const NON_PACKAGE_TOKENS: &[&str] = &["src", "tests", "docs", "python"];

/// Runtime pin files and the technology each one pins.
const RUNTIME_FILES: &[(&str, &str)] = &[
    (".python-version", "Python"),
    ("runtime.txt", "Python"),
    (".nvmrc", "Node.js"),
    (".node-version", "Node.js"),
    (".ruby-version", "Ruby"),
];

static LEGACY_QUERY_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"jquery|jQuery|\$\(").expect("legacy query signature"));

/// `name[extras] <op> version`, version optional.
static REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*(?:(===|==|~=|!=|>=|<=|>|<)\s*([^\s;,#]+))?")
        .expect("requirement pattern")
});

/// `dependencies = [...]` body, skipping `]` inside quoted strings.
static DEPENDENCY_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\bdependencies\s*=\s*\[((?:"[^"]*"|'[^']*'|[^\]"'])*)\]"#)
        .expect("dependency array pattern")
});

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("string literal pattern"));

/// A framework recognized by its import statement.
struct ImportSignature {
    name: &'static str,
    extensions: &'static [&'static str],
    pattern: &'static str,
}

const IMPORT_SIGNATURES: &[ImportSignature] = &[
    ImportSignature {
        name: "React",
        extensions: SCRIPT_EXTENSIONS,
        pattern: r#"from\s+['"]react['"]|require\(\s*['"]react['"]\s*\)"#,
    },
    ImportSignature {
        name: "Streamlit",
        extensions: &["py"],
        pattern: r"(?m)^\s*(?:import\s+streamlit|from\s+streamlit\s+import)\b",
    },
    ImportSignature {
        name: "Django",
        extensions: &["py"],
        pattern: r"(?m)^\s*(?:import\s+django|from\s+django(?:\.\w+)*\s+import)\b",
    },
    ImportSignature {
        name: "Flask",
        extensions: &["py"],
        pattern: r"(?m)^\s*(?:import\s+flask|from\s+flask\s+import)\b",
    },
];

static IMPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    IMPORT_SIGNATURES
        .iter()
        .map(|sig| Regex::new(sig.pattern).expect("import signature"))
        .collect()
});

/// Whether `name` is on the deprecation deny-list.
pub fn is_deprecated(name: &str) -> bool {
    DEPRECATED.contains(&name.to_lowercase().as_str())
}

/// Severity tier of a technology name.
pub fn technology_severity(name: &str) -> SeverityLevel {
    let lower = name.to_lowercase();
    if CURSED.contains(&lower.as_str()) {
        SeverityLevel::Cursed
    } else if HAUNTED.contains(&lower.as_str()) {
        SeverityLevel::Haunted
    } else {
        SeverityLevel::Clean
    }
}

/// Build a technology entry tagged from the deny-lists.
pub fn technology(name: impl Into<String>, version: Option<String>) -> DetectedTechnology {
    let name = name.into();
    DetectedTechnology {
        deprecated: is_deprecated(&name),
        severity: technology_severity(&name),
        name,
        version,
        last_update: None,
    }
}

/// Technology detector.
pub struct TechnologyDetector {
    max_signature_files: usize,
}

impl TechnologyDetector {
    /// Create a detector with the given limits.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_signature_files: config.max_signature_files,
        }
    }

    /// Detect technologies under `root`, deduplicated case-insensitively
    /// with the first occurrence kept.
    pub fn detect(&self, root: &Path) -> Vec<DetectedTechnology> {
        let mut found = Vec::new();

        found.extend(package_json(root));
        found.extend(runtime_pins(root));
        found.extend(requirements_txt(root));
        found.extend(pyproject(root));

        if self.search_files(root, SCRIPT_EXTENSIONS, &LEGACY_QUERY_SIGNATURE) {
            debug!("Legacy query library signature found");
            found.push(DetectedTechnology {
                name: "jQuery".to_string(),
                version: None,
                deprecated: true,
                last_update: None,
                severity: SeverityLevel::Cursed,
            });
        }

        let mut technologies = dedup(found);

        for (signature, pattern) in IMPORT_SIGNATURES.iter().zip(IMPORT_PATTERNS.iter()) {
            let present = technologies
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(signature.name));
            if !present && self.search_files(root, signature.extensions, pattern) {
                debug!("{} import signature found", signature.name);
                technologies.push(technology(signature.name, None));
            }
        }

        technologies
    }

    /// Whether any of the first files with `extensions` matches `pattern`.
    fn search_files(&self, root: &Path, extensions: &[&str], pattern: &Regex) -> bool {
        files_with_extensions(root, extensions)
            .into_iter()
            .take(self.max_signature_files)
            .any(|path| match read_lossy(&path) {
                Ok(content) => pattern.is_match(&content),
                Err(e) => {
                    warn!("Error searching {}: {}", path.display(), e);
                    false
                }
            })
    }
}

/// Keep the first entry of every case-insensitive name.
pub fn dedup(technologies: Vec<DetectedTechnology>) -> Vec<DetectedTechnology> {
    let mut seen = HashSet::new();
    technologies
        .into_iter()
        .filter(|t| seen.insert(t.name.to_lowercase()))
        .collect()
}

fn read_optional(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

/// `dependencies` and `devDependencies` of `package.json`.
fn package_json(root: &Path) -> Vec<DetectedTechnology> {
    let Some(content) = read_optional(&root.join("package.json")) else {
        return Vec::new();
    };
    let manifest: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring malformed package.json: {}", e);
            return Vec::new();
        }
    };

    let mut technologies = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = manifest.get(section).and_then(|d| d.as_object()) {
            for (name, version) in deps {
                let version = version.as_str().map(|v| v.to_string());
                technologies.push(technology(name.as_str(), version));
            }
        }
    }
    technologies
}

/// Runtime version pin files.
fn runtime_pins(root: &Path) -> Vec<DetectedTechnology> {
    let mut technologies = Vec::new();
    for (file, name) in RUNTIME_FILES {
        let Some(content) = read_optional(&root.join(file)) else {
            continue;
        };
        let Some(line) = content.lines().map(str::trim).find(|l| !l.is_empty() && !l.starts_with('#')) else {
            continue;
        };
        // runtime.txt carries a `python-3.11.4` style prefix.
        let version = line
            .strip_prefix("python-")
            .unwrap_or(line)
            .trim_start_matches('v')
            .to_string();
        technologies.push(technology(*name, Some(version)));
    }
    technologies
}

/// Parse one requirement specifier into a technology.
fn parse_requirement(requirement: &str) -> Option<DetectedTechnology> {
    let caps = REQUIREMENT.captures(requirement)?;
    let name = caps.get(1)?.as_str();
    let version = match (caps.get(2), caps.get(3)) {
        (Some(op), Some(ver)) if op.as_str() == "==" || op.as_str() == "===" => {
            Some(ver.as_str().to_string())
        }
        (Some(op), Some(ver)) => Some(format!("{}{}", op.as_str(), ver.as_str())),
        _ => None,
    };
    Some(technology(name, version))
}

/// `requirements.txt` records.
fn requirements_txt(root: &Path) -> Vec<DetectedTechnology> {
    let Some(content) = read_optional(&root.join("requirements.txt")) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(requirement_line)
        .collect()
}

/// One requirements record. URL and VCS records only count when they name
/// their package with `#egg=`.
fn requirement_line(line: &str) -> Option<DetectedTechnology> {
    if !line.contains("://") {
        return parse_requirement(line);
    }
    let (_, fragment) = line.split_once("#egg=")?;
    let name = fragment.split(['&', ' ']).next().unwrap_or_default();
    parse_requirement(name)
}

/// Dependency arrays and poetry dependency tables of `pyproject.toml`.
fn pyproject(root: &Path) -> Vec<DetectedTechnology> {
    let Some(content) = read_optional(&root.join("pyproject.toml")) else {
        return Vec::new();
    };

    match toml::from_str::<toml::Table>(&content) {
        Ok(document) => {
            let mut technologies = Vec::new();
            collect_toml(&document, &mut Vec::new(), &mut technologies);
            technologies
        }
        Err(e) => {
            debug!("pyproject.toml is not valid TOML, scanning dependency arrays: {}", e);
            dependency_arrays(&content)
        }
    }
}

/// Walk tables in document order.
///
/// Every `*dependencies` array contributes its requirement strings. Tables
/// named `*dependencies` under `tool.poetry` contribute their keys.
fn collect_toml<'a>(
    table: &'a toml::Table,
    path: &mut Vec<&'a str>,
    technologies: &mut Vec<DetectedTechnology>,
) {
    for (key, value) in table {
        let is_dependencies = key.ends_with("dependencies");
        match value {
            toml::Value::Array(items) if is_dependencies => {
                technologies.extend(
                    items
                        .iter()
                        .filter_map(|item| item.as_str())
                        .filter_map(parse_requirement)
                        .filter(|tech| !is_non_package(&tech.name)),
                );
            }
            toml::Value::Table(entries) if is_dependencies && path.starts_with(&["tool", "poetry"]) => {
                for (name, entry) in entries {
                    if !is_non_package(name) {
                        technologies.push(technology(name.as_str(), poetry_version(entry)));
                    }
                }
            }
            toml::Value::Table(inner) => {
                path.push(key.as_str());
                collect_toml(inner, path, technologies);
                path.pop();
            }
            _ => {}
        }
    }
}

/// `"^1.2"` or `{ version = "^1.2", ... }`.
fn poetry_version(value: &toml::Value) -> Option<String> {
    let version = match value {
        toml::Value::String(version) => Some(version.as_str()),
        toml::Value::Table(table) => table.get("version").and_then(|v| v.as_str()),
        _ => None,
    };
    version.filter(|v| !v.is_empty()).map(str::to_string)
}

/// String literals of every `dependencies = [...]` array, for files that do
/// not parse as TOML.
fn dependency_arrays(content: &str) -> Vec<DetectedTechnology> {
    let mut technologies = Vec::new();
    for array in DEPENDENCY_ARRAY.captures_iter(content) {
        let body = array.get(1).map(|m| m.as_str()).unwrap_or_default();
        for literal in STRING_LITERAL.captures_iter(body) {
            let text = literal
                .get(1)
                .or_else(|| literal.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            if let Some(tech) = parse_requirement(text) {
                if !is_non_package(&tech.name) {
                    technologies.push(tech);
                }
            }
        }
    }
    technologies
}

fn is_non_package(name: &str) -> bool {
    NON_PACKAGE_TOKENS.contains(&name.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn detect(root: &Path) -> Vec<DetectedTechnology> {
        TechnologyDetector::new(&AnalysisConfig::default()).detect(root)
    }

    fn names(techs: &[DetectedTechnology]) -> Vec<&str> {
        techs.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_deny_lists() {
        assert!(is_deprecated("Moment"));
        assert!(is_deprecated("jquery"));
        assert!(!is_deprecated("react"));
        assert_eq!(technology_severity("TSLint"), SeverityLevel::Cursed);
        assert_eq!(technology_severity("gulp"), SeverityLevel::Haunted);
        assert_eq!(technology_severity("express"), SeverityLevel::Clean);
    }

    #[test]
    fn test_package_json_legacy_dependency() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "package.json",
            r#"{"dependencies": {"jquery": "1.12.4", "express": "^4.17.1"}, "devDependencies": {"gulp": "3.9.1"}}"#,
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["jquery", "express", "gulp"]);

        let jquery = &techs[0];
        assert_eq!(jquery.version.as_deref(), Some("1.12.4"));
        assert!(jquery.deprecated);
        assert_eq!(jquery.severity, SeverityLevel::Cursed);

        assert!(!techs[1].deprecated);
        assert_eq!(techs[2].severity, SeverityLevel::Haunted);
    }

    #[test]
    fn test_malformed_and_missing_sources() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "package.json", "{ not json");
        write(dir.path(), "pyproject.toml", "[[[");
        assert!(detect(dir.path()).is_empty());
        assert!(detect(Path::new("/no/such/root")).is_empty());
    }

    #[test]
    fn test_source_signature_dedups_against_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "package.json", r#"{"dependencies": {"jquery": "2.1.0"}}"#);
        write(dir.path(), "src/app.js", "$(document).ready(function() {});");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["jquery"]);
        assert_eq!(techs[0].version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn test_source_signature_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "legacy/main.js", "var el = jQuery('#id');");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["jQuery"]);
        assert!(techs[0].deprecated);
        assert_eq!(techs[0].severity, SeverityLevel::Cursed);
    }

    #[test]
    fn test_signature_search_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            write(dir.path(), &format!("a{}.js", i), "const x = 1;");
        }
        write(dir.path(), "z.js", "jQuery('.x')");

        let config = AnalysisConfig {
            max_signature_files: 3,
            ..AnalysisConfig::default()
        };
        let techs = TechnologyDetector::new(&config).detect(dir.path());
        assert!(techs.is_empty());

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["jQuery"]);
    }

    #[test]
    fn test_signature_ignores_dependency_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "node_modules/jquery/dist/jquery.js", "jQuery = {}");
        assert!(detect(dir.path()).is_empty());
    }

    #[test]
    fn test_react_import_marker() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/App.tsx", "import React from 'react';\nexport default App;");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["React"]);
        assert_eq!(techs[0].severity, SeverityLevel::Clean);
        assert!(!techs[0].deprecated);
    }

    #[test]
    fn test_import_marker_not_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "package.json", r#"{"dependencies": {"react": "^18.2.0"}}"#);
        write(dir.path(), "src/App.jsx", "import React from \"react\";");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["react"]);
    }

    #[test]
    fn test_runtime_pins() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".python-version", "3.8.10\n");
        write(dir.path(), "runtime.txt", "python-3.9.1\n");
        write(dir.path(), ".nvmrc", "v14.17.0\n");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["Python", "Node.js"]);
        assert_eq!(techs[0].version.as_deref(), Some("3.8.10"));
        assert_eq!(techs[1].version.as_deref(), Some("14.17.0"));
    }

    #[test]
    fn test_requirements_txt() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "requirements.txt",
            "# deps\nDjango==2.2.28\nrequests>=2.0\nnose\n-r base.txt\ncelery[redis] ~= 5.2 ; python_version > '3'\n\n",
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["Django", "requests", "nose", "celery"]);
        assert_eq!(techs[0].version.as_deref(), Some("2.2.28"));
        assert_eq!(techs[1].version.as_deref(), Some(">=2.0"));
        assert_eq!(techs[2].version, None);
        assert!(techs[2].deprecated);
        assert_eq!(techs[3].version.as_deref(), Some("~=5.2"));
    }

    #[test]
    fn test_requirements_url_records() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "requirements.txt",
            "git+https://github.com/x/y.git#egg=pycrypto\nhttps://files.example.com/pkg-1.0-py3-none-any.whl\nflask==2.0.1\n",
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["pycrypto", "flask"]);
        assert_eq!(techs[0].version, None);
        assert_eq!(techs[0].severity, SeverityLevel::Cursed);
    }

    #[test]
    fn test_pyproject_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pyproject.toml",
            r#"
[project]
name = "demo"
dependencies = [
    "flask>=1.0",
    "python",
    'pandas',
]

[tool.setuptools]
packages = ["src", "tests"]

[tool.poetry.dependencies]
python = "^3.8"
streamlit = "^1.20"
numpy = { version = "1.24", optional = true }

[tool.black]
line-length = 100
"#,
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["flask", "pandas", "streamlit", "numpy"]);
        assert_eq!(techs[0].version.as_deref(), Some(">=1.0"));
        assert_eq!(techs[2].version.as_deref(), Some("^1.20"));
        assert_eq!(techs[3].version.as_deref(), Some("1.24"));
    }

    #[test]
    fn test_pyproject_extras_keep_whole_array() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pyproject.toml",
            "[project]\nname = \"svc\"\ndependencies = [\"celery[redis]>=5.0\", \"flask>=1.0\", \"nose\"]\n",
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["celery", "flask", "nose"]);
        assert_eq!(techs[0].version.as_deref(), Some(">=5.0"));
        assert!(techs[2].deprecated);
    }

    #[test]
    fn test_pyproject_poetry_groups() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pyproject.toml",
            "[tool.poetry.dependencies]\npython = \"^3.10\"\nrequests = \"^2.31\"\n\n[tool.poetry.group.dev.dependencies]\nnose = \"*\"\n",
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["requests", "nose"]);
        assert_eq!(techs[1].version.as_deref(), Some("*"));
    }

    #[test]
    fn test_malformed_pyproject_falls_back_to_arrays() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pyproject.toml",
            "dependencies = ['celery[redis]>=5.0', \"gulp\"]\n[broken\n",
        );

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["celery", "gulp"]);
        assert_eq!(techs[1].severity, SeverityLevel::Haunted);
    }

    #[test]
    fn test_python_import_markers() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.py", "import streamlit as st\nst.title('hi')\n");
        write(dir.path(), "web/views.py", "from django.http import HttpResponse\n");

        let techs = detect(dir.path());
        assert_eq!(names(&techs), vec!["Streamlit", "Django"]);
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let techs = dedup(vec![
            technology("Moment", Some("2.0".into())),
            technology("moment", Some("2.29".into())),
            technology("React", None),
        ]);
        assert_eq!(names(&techs), vec!["Moment", "React"]);
        assert_eq!(techs[0].version.as_deref(), Some("2.0"));
    }
}
