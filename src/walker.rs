//! Tree walker
//!
//! Depth-first, pre-order traversal producing an indented tree listing
//! and one content record per eligible file. The walk is a pure
//! function over the filesystem: the accumulator is passed down
//! explicitly and nothing is written during the walk phase.

use anyhow::{ensure, Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;

use crate::core::paths::make_relative;
use crate::core::reader::{read_record, FileRecord};
use crate::core::rules::ExcludeRules;

/// Prefix token appended once per nesting level.
const INDENT: &str = "│   ";

/// Walk behavior toggles beyond the exclusion rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Additionally prune entries matched by the root's .gitignore.
    pub use_gitignore: bool,
}

/// Result of one walk: the display tree and the captured file records,
/// in visit order.
#[derive(Debug, Clone, Default)]
pub struct TreeSnapshot {
    pub tree: Vec<String>,
    pub records: Vec<FileRecord>,
}

impl TreeSnapshot {
    /// The tree listing as a single string (empty for an empty root).
    pub fn tree_listing(&self) -> String {
        self.tree.join("\n")
    }
}

struct WalkContext<'a> {
    root: &'a Path,
    rules: &'a ExcludeRules,
    gitignore: Option<Gitignore>,
}

/// Walk `root` and capture the tree plus file contents.
pub fn walk_tree(root: &Path, rules: &ExcludeRules, opts: WalkOptions) -> Result<TreeSnapshot> {
    ensure!(root.is_dir(), "root {} is not a directory", root.display());

    let gitignore = if opts.use_gitignore {
        let mut builder = GitignoreBuilder::new(root);
        builder.add(root.join(".gitignore"));
        Some(
            builder
                .build()
                .with_context(|| format!("loading .gitignore under {}", root.display()))?,
        )
    } else {
        None
    };

    let ctx = WalkContext {
        root,
        rules,
        gitignore,
    };

    let entries = sorted_entries(root)
        .with_context(|| format!("listing root directory {}", root.display()))?;

    let mut snapshot = TreeSnapshot::default();
    visit(entries, "", &ctx, &mut snapshot);
    Ok(snapshot)
}

/// List a directory's children sorted by name. Unreadable individual
/// entries are dropped; a failure to list the directory itself is
/// reported to the caller.
fn sorted_entries(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

fn visit(entries: Vec<fs::DirEntry>, prefix: &str, ctx: &WalkContext<'_>, acc: &mut TreeSnapshot) {
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        // fs::metadata follows symlinks, so a link to a directory is
        // traversed rather than captured as an unreadable file.
        let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);

        if let Some(gitignore) = &ctx.gitignore {
            if gitignore.matched(&path, is_dir).is_ignore() {
                continue;
            }
        }

        if is_dir {
            if ctx.rules.is_dir_excluded(&name) {
                continue;
            }
            match sorted_entries(&path) {
                Ok(children) => {
                    acc.tree.push(format!("{prefix}├── {name}/"));
                    let child_prefix = format!("{prefix}{INDENT}");
                    visit(children, &child_prefix, ctx, acc);
                }
                Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                    acc.tree.push(format!("{prefix}├── {name}/ (permission denied)"));
                }
                Err(err) => {
                    acc.tree.push(format!("{prefix}├── {name}/ (error: {err})"));
                }
            }
        } else {
            if ctx.rules.is_file_excluded(&name) {
                continue;
            }
            acc.tree.push(format!("{prefix}├── {name}"));
            let rel_path = make_relative(&path, ctx.root).unwrap_or_else(|| name.clone());
            acc.records.push(read_record(&path, rel_path));
        }
    }
}
