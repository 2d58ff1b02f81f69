//! File content capture
//!
//! Reading a file produces a tagged record: numbered text on success,
//! a typed error otherwise. A failed read never aborts a run; the
//! record renders an inline placeholder in place of the content.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Why a file's content could not be captured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("file is not valid UTF-8")]
    NotUtf8,
    #[error("{0}")]
    Io(String),
}

/// Captured body of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    /// Content with every line prefixed by its 1-based number.
    Text { numbered: String },
    /// The read failed; the error stands in for the content.
    Failed { error: ReadError },
}

/// One file's capture, keyed by its path relative to the scan root.
/// Created once during the walk and never mutated afterward.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: String,
    pub body: FileBody,
    pub line_count: usize,
}

impl FileRecord {
    /// Build a record from raw text, numbering its lines.
    pub fn text(path: impl Into<String>, raw: &str) -> Self {
        let (numbered, line_count) = number_lines(raw);
        Self {
            path: path.into(),
            body: FileBody::Text { numbered },
            line_count,
        }
    }

    /// Build a record for a file that could not be read. The inline
    /// placeholder counts as a single line.
    pub fn failed(path: impl Into<String>, error: ReadError) -> Self {
        Self {
            path: path.into(),
            body: FileBody::Failed { error },
            line_count: 1,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, FileBody::Failed { .. })
    }

    /// The content as it appears in output artifacts: numbered text, or
    /// an error placeholder for failed reads.
    pub fn contents(&self) -> Cow<'_, str> {
        match &self.body {
            FileBody::Text { numbered } => Cow::Borrowed(numbered),
            FileBody::Failed { error } => Cow::Owned(format!("Error reading file: {}\n", error)),
        }
    }
}

/// Prefix every line with `"{n}| "` and return the text together with
/// its line count.
pub fn number_lines(raw: &str) -> (String, usize) {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    let mut count = 0;
    for (i, line) in raw.lines().enumerate() {
        out.push_str(&format!("{}| {}\n", i + 1, line));
        count = i + 1;
    }
    (out, count)
}

/// Read one file into a record. All failures are folded into the
/// record rather than propagated.
pub fn read_record(path: &Path, rel_path: String) -> FileRecord {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => FileRecord::text(rel_path, &text),
            Err(_) => FileRecord::failed(rel_path, ReadError::NotUtf8),
        },
        Err(err) => FileRecord::failed(rel_path, ReadError::Io(err.to_string())),
    }
}
