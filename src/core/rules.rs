//! Exclusion rules
//!
//! Two independent predicates drive traversal filtering: exact-name
//! set membership for directories and files, plus a fixed ordered
//! suffix scan for binary file extensions.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Directory names skipped by default (pruned with their whole subtree).
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    "venv",
    ".next",
    "build",
    "dist",
    ".cache",
    ".npm",
    "coverage",
    ".vscode",
    ".idea",
    ".temp",
];

/// File names skipped by default (exact match).
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    ".DS_Store",
    ".gitignore",
    ".env",
    ".env.local",
    "package-lock.json",
    "yarn.lock",
    "components.json",
    "postcss.config.js",
    "tailwind.config.js",
    "vite.config.ts",
    "eslint.config.js",
    "cli-latest",
    "gotrue-version",
    "pooler-url",
    "postgres-version",
    "project-ref",
    "rest-version",
    "storage-version",
];

/// File name suffixes always treated as binary and skipped.
///
/// Scanned in order; `.tar.gz` must stay ahead of any shorter overlap.
pub const BINARY_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".ttf", ".woff", ".woff2", ".eot", ".mp4",
    ".webm", ".ogg", ".pdf", ".zip", ".tar.gz",
];

static DEFAULT_DIR_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    DEFAULT_EXCLUDED_DIRS
        .iter()
        .map(|s| s.to_string())
        .collect()
});

static DEFAULT_FILE_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    DEFAULT_EXCLUDED_FILES
        .iter()
        .map(|s| s.to_string())
        .collect()
});

/// Exclusion rule set, immutable for the duration of one run once built.
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    dirs: HashSet<String>,
    files: HashSet<String>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ExcludeRules {
    /// Rules seeded with the default directory and file name sets.
    pub fn with_defaults() -> Self {
        Self {
            dirs: DEFAULT_DIR_SET.clone(),
            files: DEFAULT_FILE_SET.clone(),
        }
    }

    /// Rules with no name-based exclusions. The binary extension suffix
    /// list still applies.
    pub fn empty() -> Self {
        Self {
            dirs: HashSet::new(),
            files: HashSet::new(),
        }
    }

    /// Add extra excluded directory names.
    pub fn add_dirs<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs.extend(names.into_iter().map(Into::into));
    }

    /// Add extra excluded file names.
    pub fn add_files<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(names.into_iter().map(Into::into));
    }

    /// A directory is excluded when its name matches exactly.
    pub fn is_dir_excluded(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// A file is excluded when its name matches exactly or ends with
    /// one of the binary extensions.
    pub fn is_file_excluded(&self, name: &str) -> bool {
        self.files.contains(name) || BINARY_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }
}
