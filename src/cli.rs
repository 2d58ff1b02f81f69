//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::chunker::{self, DEFAULT_MAX_LINES};
use crate::core::rules::ExcludeRules;
use crate::report::RunReport;
use crate::walker::{walk_tree, WalkOptions};
use crate::writer;

/// treepack - snapshot a project tree and export its contents in bounded chunks.
#[derive(Parser, Debug)]
#[command(name = "treepack")]
#[command(
    author,
    version,
    about,
    long_about = r#"treepack walks a project directory, applies exclusion rules, and exports
the result as text artifacts sized for review or AI-assistant context.

Commands:
- tree: print the directory tree listing to stdout
- dump: write the tree artifact plus numbered content chunks
- stats: emit a JSON run report without writing artifacts

Examples:
    treepack tree
    treepack --root ../myproject dump --output project_documentation
    treepack dump --max-lines 1000 --stats
    treepack stats | jq .total_lines
"#
)]
pub struct Cli {
    /// Root directory to walk.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to walk (defaults to the current directory).\n\n\
All paths recorded in artifacts and reports are relative to this root."
    )]
    pub root: PathBuf,

    /// Extra directory name to exclude (repeatable).
    #[arg(
        long = "exclude-dir",
        global = true,
        value_name = "NAME",
        long_help = "Extra directory name to exclude, matched exactly against each\n\
directory's name. An excluded directory is pruned with its whole subtree.\n\
Repeat the flag to add several names."
    )]
    pub exclude_dirs: Vec<String>,

    /// Extra file name to exclude (repeatable).
    #[arg(
        long = "exclude-file",
        global = true,
        value_name = "NAME",
        long_help = "Extra file name to exclude, matched exactly. Files with binary\n\
extensions (images, fonts, video, archives) are always skipped.\n\
Repeat the flag to add several names."
    )]
    pub exclude_files: Vec<String>,

    /// Start from an empty exclusion set instead of the built-in defaults.
    #[arg(
        long,
        global = true,
        long_help = "Drop the built-in excluded directory and file name sets\n\
(node_modules, .git, lockfiles, ...). The fixed binary extension list still applies."
    )]
    pub no_default_excludes: bool,

    /// Also honor the root's .gitignore.
    #[arg(
        long,
        global = true,
        long_help = "Additionally prune entries matched by the .gitignore at the root.\n\n\
Off by default: traversal is normally governed only by the exclusion name sets."
    )]
    pub use_gitignore: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Useful when piping stderr summaries to files."
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the directory tree listing to stdout.
    #[command(
        long_about = "Walk ROOT and print the indented tree listing to stdout.\n\
Excluded directories and files do not appear; unreadable directories are\n\
marked in place and do not fail the run.\n\n\
Example:\n\
  treepack --root src tree\n"
    )]
    Tree,

    /// Write the tree artifact and chunked content artifacts.
    #[command(
        long_about = "Walk ROOT, write <BASE>_0_tree.txt with the tree listing, then write\n\
the captured file contents as <BASE>_NN.txt chunks. No chunk exceeds the\n\
line threshold except when a single file is itself larger than the\n\
threshold; such files get a dedicated, labeled artifact and are never\n\
split mid-content.\n\n\
Examples:\n\
  treepack dump\n\
  treepack dump --output docs/project_documentation --max-lines 1000 --stats\n"
    )]
    Dump {
        /// Output artifact base name.
        #[arg(
            long,
            default_value = "project_documentation",
            value_name = "BASE",
            long_help = "Base name for output artifacts. The tree is written to\n\
<BASE>_0_tree.txt and content chunks to <BASE>_01.txt, <BASE>_02.txt, ..."
        )]
        output: String,

        /// Maximum content lines per chunk.
        #[arg(long, default_value_t = DEFAULT_MAX_LINES, value_name = "N")]
        max_lines: usize,

        /// Print a run summary to stderr.
        #[arg(long)]
        stats: bool,
    },

    /// Emit a JSON run report without writing artifacts.
    #[command(
        long_about = "Walk ROOT, plan the chunk sequence, and print a JSON report to stdout:\n\
totals, per-file line counts and content hashes, and chunk statistics.\n\
Nothing is written to disk.\n\n\
Example:\n\
  treepack stats --max-lines 1000\n"
    )]
    Stats {
        /// Chunk threshold used for the planned chunk statistics.
        #[arg(long, default_value_t = DEFAULT_MAX_LINES, value_name = "N")]
        max_lines: usize,
    },
}

/// Build the exclusion rules from global options.
fn build_rules(cli: &Cli) -> ExcludeRules {
    let mut rules = if cli.no_default_excludes {
        ExcludeRules::empty()
    } else {
        ExcludeRules::with_defaults()
    };
    rules.add_dirs(cli.exclude_dirs.iter().cloned());
    rules.add_files(cli.exclude_files.iter().cloned());
    rules
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());
    let rules = build_rules(&cli);
    let opts = WalkOptions {
        use_gitignore: cli.use_gitignore,
    };

    match cli.command {
        Commands::Tree => {
            let snapshot = walk_tree(&root, &rules, opts)?;
            println!("{}", snapshot.tree_listing());
            Ok(())
        }

        Commands::Dump {
            output,
            max_lines,
            stats,
        } => run_dump(&root, &rules, opts, &output, max_lines, stats),

        Commands::Stats { max_lines } => {
            let snapshot = walk_tree(&root, &rules, opts)?;
            let chunks = chunker::plan_chunks(&snapshot.records, max_lines);
            let report = RunReport::build(&root, &snapshot.records, &chunks, max_lines);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn run_dump(
    root: &Path,
    rules: &ExcludeRules,
    opts: WalkOptions,
    output: &str,
    max_lines: usize,
    stats: bool,
) -> Result<()> {
    let snapshot = walk_tree(root, rules, opts)?;

    // Tree artifact first, regardless of content chunking.
    let tree_path = writer::write_tree(output, &snapshot.tree_listing())?;

    let chunks = chunker::plan_chunks(&snapshot.records, max_lines);
    let chunk_paths = writer::write_chunks(output, &snapshot.records, &chunks)?;

    if stats {
        let report = RunReport::build(root, &snapshot.records, &chunks, max_lines);
        let mut artifacts = vec![tree_path];
        artifacts.extend(chunk_paths);
        report.print_summary(&artifacts);
    }

    Ok(())
}
