//! Artifact emission
//!
//! Writes the tree artifact and the planned content chunks. Write
//! failures propagate and terminate the run; the output filesystem is
//! assumed reliable.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::chunker::{Chunk, ChunkKind};
use crate::core::reader::FileRecord;

const BANNER_WIDTH: usize = 80;

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn rule() -> String {
    "-".repeat(BANNER_WIDTH)
}

/// Frame one record for inclusion in a chunk artifact: a path header,
/// a separator rule, then the rendered contents.
fn frame(record: &FileRecord) -> String {
    format!("\nFile: {}\n{}\n{}\n", record.path, rule(), record.contents())
}

/// Write the tree artifact `<base>_0_tree.txt`. Index 0 is reserved
/// for the tree; it is always written before any content chunk.
pub fn write_tree(base: &str, tree_listing: &str) -> Result<PathBuf> {
    let path = PathBuf::from(format!("{base}_0_tree.txt"));

    let mut out = String::new();
    out.push_str(&banner());
    out.push('\n');
    out.push_str("PROJECT TREE STRUCTURE\n");
    out.push_str(&banner());
    out.push_str("\n\n");
    out.push_str(tree_listing);

    fs::write(&path, out).with_context(|| format!("writing tree artifact {}", path.display()))?;
    Ok(path)
}

/// Write the planned chunks as `<base>_NN.txt`, NN two-digit from 01.
pub fn write_chunks(base: &str, records: &[FileRecord], chunks: &[Chunk]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let path = PathBuf::from(format!("{base}_{:02}.txt", chunk.index));

        let mut out = String::new();
        out.push_str(&banner());
        out.push('\n');
        match &chunk.kind {
            ChunkKind::Normal => {
                out.push_str(&format!("FILE CONTENTS (PART {})\n", chunk.index));
                out.push_str(&format!("Lines: {}\n", chunk.line_count));
            }
            ChunkKind::Oversized { path: file, lines } => {
                out.push_str(&format!("LARGE FILE: {file} ({lines} lines)\n"));
            }
        }
        out.push_str(&banner());
        out.push_str("\n\n");

        for &member in &chunk.members {
            out.push_str(&frame(&records[member]));
        }

        fs::write(&path, out)
            .with_context(|| format!("writing chunk artifact {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
