//! treepack - export a project tree and its file contents in bounded chunks
//!
//! treepack provides:
//! - Ordered, exclusion-aware directory traversal
//! - Line-numbered file content capture that never aborts over one file
//! - Chunked output artifacts bounded by a per-chunk line threshold

use anyhow::Result;
use clap::Parser;

mod chunker;
mod cli;
mod core;
mod report;
mod walker;
mod writer;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
