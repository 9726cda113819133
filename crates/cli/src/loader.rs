//! JSON-lines loading.
//!
//! Each non-blank line is one JSON object (one document). The value under the
//! chosen field becomes that document's float; documents where the field is
//! missing or `null` have no value. Documents are cut into segments of a
//! fixed size in input order.

use funcscore_core::index::FloatColumn;
use funcscore_core::{DocId, IndexSearcher, SegmentReader};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Reads one optional float per document from JSON lines.
///
/// Non-numeric field values are logged and treated as missing. Malformed
/// JSON or a line that is not an object fails with the 1-based line number.
pub fn parse_field_values<R: BufRead>(reader: R, field: &str) -> io::Result<Vec<Option<f32>>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Value = serde_json::from_str(&line).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {line_no}: invalid JSON: {e}"),
            )
        })?;
        let Value::Object(map) = doc else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {line_no}: expected a JSON object"),
            ));
        };
        let value = match map.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
            Some(other) => {
                tracing::warn!(line = line_no, field, value = %other, "Non-numeric field value, treating as missing");
                None
            }
        };
        values.push(value);
    }
    Ok(values)
}

/// Splits per-document values into segments of `segment_size` documents.
pub fn build_searcher(values: Vec<Option<f32>>, field: &str, segment_size: usize) -> io::Result<IndexSearcher> {
    if segment_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "segment size must be > 0",
        ));
    }
    let readers = values
        .chunks(segment_size)
        .map(|chunk| {
            SegmentReader::new(chunk.len() as DocId)
                .with_float_field(field, FloatColumn::from_options(chunk.iter().copied()))
                .map(Arc::new)
                .map_err(io::Error::other)
        })
        .collect::<io::Result<Vec<_>>>()?;
    let searcher = IndexSearcher::try_new(readers).map_err(io::Error::other)?;
    tracing::info!(
        documents = searcher.max_doc(),
        segments = searcher.leaves().len(),
        field,
        "Loaded documents"
    );
    Ok(searcher)
}

/// Loads a JSON-lines file into a searcher.
pub fn load_searcher(path: &Path, field: &str, segment_size: usize) -> io::Result<IndexSearcher> {
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot open {}: {e}", path.display())))?;
    let values = parse_field_values(BufReader::new(file), field)?;
    build_searcher(values, field, segment_size)
}
