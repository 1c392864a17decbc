//! Directory traversal with ignore-list pruning.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::filter::{has_ignored_extension, is_ignored_dir};

/// Collects every scannable file under `root`, in traversal order.
///
/// Ignored directories are pruned at traversal time, so their contents are
/// never stat'd, and files with binary extensions are dropped before they
/// are ever opened. Hidden files are included; dotfiles such as `.env` are
/// prime secret carriers. Traversal errors (dangling symlinks, vanished
/// entries) are logged and skipped.
///
/// If `root` is a regular file it is returned as the single entry, subject
/// to the same extension filter.
#[must_use]
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if is_dir && entry.depth() > 0 {
                let name = entry.file_name().to_string_lossy();
                return !is_ignored_dir(&name);
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                if has_ignored_extension(entry.path()) {
                    continue;
                }
                files.push(entry.into_path());
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests")]

    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn collects_files_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::write(dir.path().join("a/b/deep.txt"), "x").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(names(dir.path(), &files), vec!["a/b/deep.txt", "top.txt"]);
    }

    #[test]
    fn prunes_ignored_directories() {
        let dir = TempDir::new().unwrap();
        for ignored in [".git", "node_modules", "__pycache__", "target"] {
            fs::create_dir_all(dir.path().join(ignored)).unwrap();
            fs::write(dir.path().join(ignored).join("inside.txt"), "x").unwrap();
        }
        fs::write(dir.path().join("kept.txt"), "x").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(names(dir.path(), &files), vec!["kept.txt"]);
    }

    #[test]
    fn drops_binary_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("photo.png"), "x").unwrap();
        fs::write(dir.path().join("ARCHIVE.ZIP"), "x").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(names(dir.path(), &files), vec!["notes.md"]);
    }

    #[test]
    fn includes_hidden_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(names(dir.path(), &files), vec![".env"]);
    }

    #[test]
    fn a_file_root_yields_that_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("single.txt");
        fs::write(&path, "x").unwrap();

        let files = collect_files(&path);
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn a_binary_file_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("single.png");
        fs::write(&path, "x").unwrap();

        assert!(collect_files(&path).is_empty());
    }

    #[test]
    fn a_missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(collect_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn an_ignored_name_at_the_root_is_still_scanned() {
        // Pruning applies to directories inside the tree, not to the root
        // the user asked for.
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("node_modules");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("inner.txt"), "x").unwrap();

        let files = collect_files(&root);
        assert_eq!(names(&root, &files), vec!["inner.txt"]);
    }
}
