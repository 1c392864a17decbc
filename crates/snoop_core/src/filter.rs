//! Fixed ignore sets deciding which filesystem entries are never scanned.

use std::path::Path;

/// Directory names that are never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "venv",
    ".venv",
    "env",
    "target",
    "__pycache__",
    ".idea",
    ".vscode",
    ".pytest_cache",
    ".mypy_cache",
];

/// File extensions (lowercase, without the dot) that are never opened.
///
/// These cover binary formats where line scanning is meaningless and the
/// lossy UTF-8 decode would only produce noise.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "pyc", "pyo", "pdf", "zip", "tar", "gz", "exe",
    "dll", "so", "dylib", "woff", "woff2", "ttf", "eot",
];

/// Returns `true` if `name` is a directory that must be pruned from the walk.
#[must_use]
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Returns `true` if the path has an extension in the binary ignore list.
///
/// Matching is case-insensitive; `LOGO.PNG` is skipped like `logo.png`.
/// Files with no extension are always scanned.
#[must_use]
pub fn has_ignored_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lowered = ext.to_ascii_lowercase();
            IGNORED_EXTENSIONS.contains(&lowered.as_str())
        })
}
