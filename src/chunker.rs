//! Chunk planning
//!
//! Splits the ordered file records into bounded output segments. Pure
//! planning only; artifact writing lives in `writer`.

use crate::core::reader::FileRecord;

/// Default maximum content lines per chunk.
pub const DEFAULT_MAX_LINES: usize = 2500;

/// What a chunk holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkKind {
    /// One or more records whose combined line count fits the threshold.
    Normal,
    /// A single record whose own line count exceeds the threshold.
    /// Oversized files get a dedicated artifact and are never split.
    Oversized { path: String, lines: usize },
}

/// One planned output segment. `members` are indices into the record
/// slice the plan was built from, in walk order.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 1-based sequence number; index 0 is reserved for the tree artifact.
    pub index: usize,
    pub kind: ChunkKind,
    pub line_count: usize,
    pub members: Vec<usize>,
}

/// Total content line count across all records (diagnostic).
pub fn total_lines(records: &[FileRecord]) -> usize {
    records.iter().map(|r| r.line_count).sum()
}

/// Plan the chunk sequence for `records` under a `max_lines` threshold.
///
/// Records are consumed in order. An oversized record first seals any
/// buffered chunk, then becomes its own chunk; accumulation resumes
/// with a fresh buffer afterward, so a small tail chunk directly after
/// an oversized one is expected. A sealed normal chunk never exceeds
/// `max_lines`.
pub fn plan_chunks(records: &[FileRecord], max_lines: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer: Vec<usize> = Vec::new();
    let mut buffered_lines = 0usize;
    let mut next_index = 1usize;

    let seal =
        |buffer: &mut Vec<usize>, buffered_lines: &mut usize, next_index: &mut usize, chunks: &mut Vec<Chunk>| {
            chunks.push(Chunk {
                index: *next_index,
                kind: ChunkKind::Normal,
                line_count: *buffered_lines,
                members: std::mem::take(buffer),
            });
            *next_index += 1;
            *buffered_lines = 0;
        };

    for (i, record) in records.iter().enumerate() {
        let lines = record.line_count;

        if lines > max_lines {
            if !buffer.is_empty() {
                seal(&mut buffer, &mut buffered_lines, &mut next_index, &mut chunks);
            }
            chunks.push(Chunk {
                index: next_index,
                kind: ChunkKind::Oversized {
                    path: record.path.clone(),
                    lines,
                },
                line_count: lines,
                members: vec![i],
            });
            next_index += 1;
            continue;
        }

        if buffered_lines + lines > max_lines && !buffer.is_empty() {
            seal(&mut buffer, &mut buffered_lines, &mut next_index, &mut chunks);
        }
        buffer.push(i);
        buffered_lines += lines;
    }

    if !buffer.is_empty() {
        seal(&mut buffer, &mut buffered_lines, &mut next_index, &mut chunks);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, lines: usize) -> FileRecord {
        let raw = "x\n".repeat(lines);
        let rec = FileRecord::text(path, &raw);
        assert_eq!(rec.line_count, lines);
        rec
    }

    #[test]
    fn test_empty_input() {
        assert!(plan_chunks(&[], DEFAULT_MAX_LINES).is_empty());
    }

    #[test]
    fn test_single_small_record() {
        let records = vec![record("a.py", 10)];
        let chunks = plan_chunks(&records, 2500);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 1);
        assert_eq!(chunks[0].kind, ChunkKind::Normal);
        assert_eq!(chunks[0].line_count, 10);
        assert_eq!(chunks[0].members, vec![0]);
    }

    #[test]
    fn test_small_file_flushed_before_oversized() {
        // a.py (10 lines) then b.py (3000 lines) at threshold 2500:
        // a.py is flushed as chunk 1 when b.py triggers the oversized
        // path, b.py becomes a dedicated chunk 2.
        let records = vec![record("a.py", 10), record("b.py", 3000)];
        let chunks = plan_chunks(&records, 2500);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].kind, ChunkKind::Normal);
        assert_eq!(chunks[0].members, vec![0]);
        assert_eq!(
            chunks[1].kind,
            ChunkKind::Oversized {
                path: "b.py".to_string(),
                lines: 3000
            }
        );
        assert_eq!(chunks[1].members, vec![1]);
    }

    #[test]
    fn test_seal_when_next_record_would_exceed() {
        let records = vec![record("a", 60), record("b", 50), record("c", 10)];
        let chunks = plan_chunks(&records, 100);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].members, vec![0]);
        assert_eq!(chunks[0].line_count, 60);
        assert_eq!(chunks[1].members, vec![1, 2]);
        assert_eq!(chunks[1].line_count, 60);
    }

    #[test]
    fn test_exact_fit_does_not_seal_early() {
        let records = vec![record("a", 40), record("b", 60), record("c", 1)];
        let chunks = plan_chunks(&records, 100);

        // 40 + 60 == 100 fits exactly; "c" starts the next chunk.
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].members, vec![0, 1]);
        assert_eq!(chunks[0].line_count, 100);
        assert_eq!(chunks[1].members, vec![2]);
    }

    #[test]
    fn test_tail_chunk_after_oversized() {
        let records = vec![record("big", 300), record("small", 5)];
        let chunks = plan_chunks(&records, 100);

        assert_eq!(chunks.len(), 2);
        assert!(matches!(chunks[0].kind, ChunkKind::Oversized { .. }));
        assert_eq!(chunks[1].kind, ChunkKind::Normal);
        assert_eq!(chunks[1].members, vec![1]);
    }

    #[test]
    fn test_invariants_over_mixed_sequence() {
        let max = 100;
        let records = vec![
            record("a", 80),
            record("b", 30),
            record("c", 150),
            record("d", 10),
            record("e", 95),
            record("f", 200),
        ];
        let chunks = plan_chunks(&records, max);

        // Sealed normal chunks never exceed the threshold; oversized
        // chunks hold exactly one record above the threshold.
        for chunk in &chunks {
            match &chunk.kind {
                ChunkKind::Normal => assert!(chunk.line_count <= max),
                ChunkKind::Oversized { lines, .. } => {
                    assert_eq!(chunk.members.len(), 1);
                    assert!(*lines > max);
                }
            }
        }

        // Concatenating members in chunk order reproduces the walk
        // order with nothing dropped or duplicated.
        let flat: Vec<usize> = chunks.iter().flat_map(|c| c.members.clone()).collect();
        assert_eq!(flat, (0..records.len()).collect::<Vec<_>>());

        // Indices are sequential from 1.
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i + 1);
        }
    }

    #[test]
    fn test_record_at_exactly_threshold_is_not_oversized() {
        let records = vec![record("edge", 100)];
        let chunks = plan_chunks(&records, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Normal);
    }

    #[test]
    fn test_total_lines() {
        let records = vec![record("a", 3), record("b", 7)];
        assert_eq!(total_lines(&records), 10);
    }
}
