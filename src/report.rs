//! Run diagnostics
//!
//! A serializable summary of one walk + chunk plan: totals, per-file
//! line counts and content hashes, and chunk statistics. The `stats`
//! command emits it as JSON; `dump --stats` prints the short human
//! form to stderr.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::chunker::{total_lines, Chunk, ChunkKind};
use crate::core::reader::{FileBody, FileRecord};
use crate::core::util::hash_bytes;

/// Per-file entry in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub max_lines_per_chunk: usize,
    pub total_files: usize,
    pub unreadable_files: usize,
    pub total_lines: usize,
    pub chunk_count: usize,
    pub oversized_chunks: usize,
    pub files: Vec<FileEntry>,
}

impl RunReport {
    pub fn build(root: &Path, records: &[FileRecord], chunks: &[Chunk], max_lines: usize) -> Self {
        let files: Vec<FileEntry> = records
            .iter()
            .map(|record| {
                let error = match &record.body {
                    FileBody::Text { .. } => None,
                    FileBody::Failed { error } => Some(error.to_string()),
                };
                let hash = if error.is_none() {
                    Some(hash_bytes(record.contents().as_bytes()))
                } else {
                    None
                };
                FileEntry {
                    path: record.path.clone(),
                    lines: record.line_count,
                    hash,
                    error,
                }
            })
            .collect();

        let oversized_chunks = chunks
            .iter()
            .filter(|c| matches!(c.kind, ChunkKind::Oversized { .. }))
            .count();

        Self {
            root: root.display().to_string(),
            generated_at: Utc::now(),
            max_lines_per_chunk: max_lines,
            total_files: records.len(),
            unreadable_files: files.iter().filter(|f| f.error.is_some()).count(),
            total_lines: total_lines(records),
            chunk_count: chunks.len(),
            oversized_chunks,
            files,
        }
    }

    /// Print the short human summary to stderr.
    pub fn print_summary(&self, artifacts: &[PathBuf]) {
        eprintln!("{}", "Run summary".bold());
        eprintln!("  Root:        {}", self.root);
        eprintln!(
            "  Files:       {} ({} unreadable)",
            self.total_files.to_string().green(),
            if self.unreadable_files > 0 {
                self.unreadable_files.to_string().red()
            } else {
                self.unreadable_files.to_string().normal()
            }
        );
        eprintln!("  Lines:       {}", self.total_lines);
        eprintln!(
            "  Chunks:      {} (max {} lines each, {} oversized)",
            self.chunk_count, self.max_lines_per_chunk, self.oversized_chunks
        );
        for artifact in artifacts {
            eprintln!("  Wrote:       {}", artifact.display());
        }
    }
}
