//! Filesystem operations backing the review tools.
//!
//! Contract: these functions degrade instead of failing. Enumeration logs
//! and skips unreadable entries, and `read_file` returns an empty string
//! for anything that is not a readable UTF-8 file, so a review session is
//! never aborted by a filesystem error.

use std::path::Path;

use tracing::warn;

/// Directory names excluded from review, at any nesting depth.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".git",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "target",
    "coverage",
];

/// File extensions excluded from review (without the leading dot).
pub const IGNORED_EXTENSIONS: &[&str] = &["lock", "log"];

fn has_ignored_segment(path: &Path) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
    })
}

fn has_ignored_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IGNORED_EXTENSIONS.contains(&ext))
}

/// Recursively list the reviewable files under `dir_path`.
///
/// Entries inside an ignored directory are pruned at any depth, and files
/// with an ignored extension are skipped. Returns absolute paths; the
/// order is filesystem-dependent. Unreadable entries are logged and
/// skipped, so a partial listing is returned rather than an error.
pub fn list_files(dir_path: &str) -> Vec<String> {
    let mut all_files = Vec::new();

    let root = match std::fs::canonicalize(dir_path) {
        Ok(root) => root,
        Err(e) => {
            warn!("[tools] failed to resolve directory {dir_path}: {e}");
            return all_files;
        }
    };

    let pattern = format!("{}/**/*", glob::Pattern::escape(&root.to_string_lossy()));
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("[tools] invalid listing pattern for {dir_path}: {e}");
            return all_files;
        }
    };

    for entry in entries {
        match entry {
            Ok(path) => {
                if has_ignored_segment(&path) {
                    continue;
                }
                if path.is_file() && !has_ignored_extension(&path) {
                    all_files.push(path.to_string_lossy().into_owned());
                }
            }
            Err(e) => {
                warn!("[tools] skipping unreadable entry: {e}");
            }
        }
    }

    all_files
}

/// Read the full UTF-8 content of a file.
///
/// Returns an empty string when the path is not a regular file or cannot
/// be decoded; callers cannot distinguish an empty file from a failed
/// read.
pub fn read_file(file_path: &str) -> String {
    let path = Path::new(file_path);
    if !path.is_file() {
        warn!("[tools] not a regular file: {file_path}");
        return String::new();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("[tools] failed to read {file_path}: {e}");
            String::new()
        }
    }
}

/// Write model-supplied content to a file, reporting success as a boolean.
pub fn write_file(file_path: &str, content: &str) -> bool {
    match std::fs::write(file_path, content) {
        Ok(()) => true,
        Err(e) => {
            warn!("[tools] failed to write {file_path}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn listing_prunes_ignored_directories_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("src/main.py"), "print('hi')");
        touch(&root.join("src/lib/util.js"), "export {}");
        touch(&root.join("node_modules/pkg/index.js"), "ignored");
        touch(&root.join("src/node_modules/pkg/deep.js"), "ignored");
        touch(&root.join(".git/config"), "ignored");

        let files = list_files(root.to_str().unwrap());

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| !f.contains("node_modules")));
        assert!(files.iter().all(|f| !f.contains(".git")));
        assert!(files.iter().any(|f| f.ends_with("main.py")));
        assert!(files.iter().any(|f| f.ends_with("util.js")));
    }

    #[test]
    fn listing_skips_ignored_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("Cargo.lock"), "ignored");
        touch(&root.join("run.log"), "ignored");
        touch(&root.join("app.py"), "pass");

        let files = list_files(root.to_str().unwrap());

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.py"));
    }

    #[test]
    fn listing_returns_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.py"), "pass");

        let files = list_files(dir.path().to_str().unwrap());

        assert_eq!(files.len(), 1);
        assert!(Path::new(&files[0]).is_absolute());
    }

    #[test]
    fn listing_a_missing_directory_returns_empty() {
        assert!(list_files("/definitely/not/a/real/dir").is_empty());
    }

    #[test]
    fn reading_a_missing_file_returns_empty_string() {
        assert_eq!(read_file("/definitely/not/a/real/file.py"), "");
    }

    #[test]
    fn reading_a_directory_returns_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_file(dir.path().to_str().unwrap()), "");
    }

    #[test]
    fn read_returns_full_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        touch(&file, "line one\nline two\n");

        assert_eq!(read_file(file.to_str().unwrap()), "line one\nline two\n");
    }

    #[test]
    fn write_reports_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");

        assert!(write_file(file.to_str().unwrap(), "fixed"));
        assert_eq!(read_file(file.to_str().unwrap()), "fixed");
        assert!(!write_file("/no/such/dir/out.txt", "fixed"));
    }
}
