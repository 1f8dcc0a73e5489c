//! Deterministic source-tree traversal.
//!
//! Every scanner walks the tree through this module so that "first N files"
//! caps select the same files: depth-first, entries sorted by file name
//! within each directory.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Extensions treated as source code.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "php", "java", "rb", "go", "rs", "swift", "kt", "cs", "hs",
    "zig", "c", "cpp", "h", "hpp",
];

/// JavaScript and TypeScript extensions.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Dependency, cache and virtual-environment directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "vendor",
    "venv",
    "bower_components",
];

/// All source files under `root`, in walk order.
pub fn source_files(root: &Path) -> Vec<PathBuf> {
    files_with_extensions(root, SOURCE_EXTENSIONS)
}

/// Files under `root` whose extension is in `extensions`, in walk order.
///
/// Hidden directories and [`SKIPPED_DIRS`] are pruned. Unreadable
/// directories are logged and skipped.
pub fn files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned_dir(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    files
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Case-sensitive extension match.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext))
        .unwrap_or(false)
}

/// Read a file as text, replacing invalid UTF-8.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `path` relative to `root` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Number of lines, counting a trailing newline as starting an empty line.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_walk_order_is_depth_first_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.js");
        touch(dir.path(), "a/z.py");
        touch(dir.path(), "a/b/c.go");
        touch(dir.path(), "c.rs");

        let files: Vec<_> = source_files(dir.path())
            .iter()
            .map(|p| relative_path(dir.path(), p))
            .collect();
        assert_eq!(files, vec!["a/b/c.go", "a/z.py", "b.js", "c.rs"]);
    }

    #[test]
    fn test_pruned_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/app.js");
        touch(dir.path(), "node_modules/lib/index.js");
        touch(dir.path(), ".git/hooks/pre-commit.js");
        touch(dir.path(), "venv/lib/site.py");
        touch(dir.path(), "vendor/autoload.php");
        touch(dir.path(), "pkg/__pycache__/mod.py");

        let files: Vec<_> = source_files(dir.path())
            .iter()
            .map(|p| relative_path(dir.path(), p))
            .collect();
        assert_eq!(files, vec!["src/app.js"]);
    }

    #[test]
    fn test_hidden_root_is_walked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".checkout");
        touch(&root, "main.go");
        assert_eq!(source_files(&root).len(), 1);
    }

    #[test]
    fn test_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.js");
        touch(dir.path(), "b.py");
        touch(dir.path(), "README.md");
        touch(dir.path(), "C.JS");

        assert_eq!(files_with_extensions(dir.path(), SCRIPT_EXTENSIONS).len(), 1);
        assert_eq!(source_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        assert!(source_files(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_read_lossy_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.js");
        fs::write(&path, [b'v', b'a', b'r', 0xff, b'\n', b'x']).unwrap();
        let content = read_lossy(&path).unwrap();
        assert!(content.starts_with("var"));
        assert_eq!(line_count(&content), 2);
        assert_eq!(line_count(""), 1);
    }
}
