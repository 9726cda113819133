use funcscore_cli::loader::load_searcher;
use funcscore_core::search::{range_filter, FunctionQuery, ValueRange};
use funcscore_core::source::{FloatFieldSource, ReciprocalFloatFunction};
use funcscore_core::ValueSource;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

fn write_docs(dir: &TempDir, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("docs.jsonl");
    let mut file = std::fs::File::create(&path).expect("Failed to create input file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write input file");
    }
    path
}

fn recip(field: &str) -> Arc<dyn ValueSource> {
    Arc::new(ReciprocalFloatFunction::new(
        Arc::new(FloatFieldSource::new(field)),
        1.0,
        1.0,
        1.0,
    ))
}

#[test]
fn test_load_and_rank_file() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = write_docs(
        &tmp,
        &[
            r#"{"id": "a", "age": 3}"#,
            r#"{"id": "b", "age": 1}"#,
            "",
            r#"{"id": "c"}"#,
            r#"{"id": "d", "age": 0}"#,
        ],
    );
    let searcher = load_searcher(&path, "age", 2).unwrap();
    assert_eq!(searcher.max_doc(), 4);
    assert_eq!(searcher.leaves().len(), 2);

    let results = FunctionQuery::new(recip("age")).search(&searcher, 3).unwrap();
    let ids: Vec<u32> = results.iter().map(|r| r.doc).collect();
    // "c" has no age and scores 1/(0+1) like "d"
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(results[2].score, 0.5);
}

#[test]
fn test_range_over_loaded_file() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = write_docs(&tmp, &[r#"{"age": 0}"#, r#"{"age": 1}"#, r#"{"age": 3}"#]);
    let searcher = load_searcher(&path, "age", 10).unwrap();
    let docs = range_filter(&searcher, recip("age").as_ref(), &ValueRange::closed(0.3, 0.6)).unwrap();
    assert_eq!(docs, vec![1]);
}

#[test]
fn test_missing_file_errors() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let err = load_searcher(&tmp.path().join("nope.jsonl"), "age", 10).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(err.to_string().contains("nope.jsonl"));
}

#[test]
fn test_malformed_file_errors() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = write_docs(&tmp, &[r#"{"age": 1}"#, "not json"]);
    let err = load_searcher(&path, "age", 10).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
}
