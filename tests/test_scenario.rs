use std::fs;
use std::io;

use daylog::split_blocks;
use daylog::FileWriter;
use daylog::LogRecord;
use daylog::Options;
use daylog::SEPARATOR;
use pretty_assertions::assert_eq;
use serde::Serialize;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize)]
struct RequestInfo {
    url: String,
    method: String,
    status: u16,
}

impl LogRecord for RequestInfo {
    const TYPE_NAME: &'static str = "RequestInfo";
}

fn record(url_len: usize) -> RequestInfo {
    RequestInfo {
        url: "u".repeat(url_len),
        method: "GET".to_string(),
        status: 200,
    }
}

/// End-to-end run of the documented scenario: a 1 MiB threshold, a write
/// that lands in `{root}/RequestInfo/RequestInfo_{yyyy-MM-dd}.log`, and a
/// second large batch that rotates the file.
#[test]
fn test_file_writer_scenario() -> Result<(), io::Error> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_str().unwrap().to_string();

    let writer = FileWriter::new();
    writer
        .init(&Options::new([
            ("RootDirectory", root.as_str()),
            ("MaxLength", "1"),
        ]))
        .unwrap();

    // root is normalized with a trailing separator
    assert_eq!(writer.root_dir(), Some(format!("{}/", root)));

    // one small record
    writer
        .write(Some(&RequestInfo {
            url: "/orders/42".to_string(),
            method: "GET".to_string(),
            status: 200,
        }))
        .unwrap();

    let path = writer.resolve_path::<RequestInfo>().unwrap();
    assert!(path.starts_with(&format!("{}/RequestInfo/RequestInfo_", root)));
    assert!(path.ends_with(".log"));

    let content = fs::read_to_string(&path)?;
    assert!(content.contains(SEPARATOR));
    assert_eq!(split_blocks(&content).len(), 1);

    // first batch totals just under 1 MiB, second batch crosses the line
    writer.write_batch(&[record(900_000)]).unwrap();
    let before_rotation = fs::read_to_string(&path)?;

    writer.write_batch(&[record(100_000)]).unwrap();

    let rotated = path.replace(".log", ".000000001.log");
    assert_eq!(fs::read_to_string(&rotated)?, before_rotation);

    let after = fs::read_to_string(&path)?;
    assert_eq!(split_blocks(&after).len(), 1);

    Ok(())
}

/// A second init through the public API is a no-op and retrieval stays a
/// typed failure.
#[test]
fn test_public_contract() -> Result<(), io::Error> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().to_str().unwrap().to_string();

    let writer = FileWriter::new();
    writer
        .init(&Options::new([("RootDirectory", root.as_str())]))
        .unwrap();
    writer
        .init(&Options::new([("RootDirectory", "/nonexistent/elsewhere")]))
        .unwrap();
    assert_eq!(writer.root_dir(), Some(format!("{}/", root)));

    // null record and empty batch: no error, no files
    writer.write::<RequestInfo>(None).unwrap();
    writer.write_batch::<RequestInfo>(&[]).unwrap();
    assert_eq!(fs::read_dir(&root)?.count(), 0);

    let err = writer
        .get_by_id::<RequestInfo>(uuid::Uuid::new_v4())
        .unwrap_err();
    assert_eq!(err.to_string(), "operation 'get_by_id' is not supported by this writer");

    let now = time::OffsetDateTime::now_utc();
    assert!(writer.get_range::<RequestInfo>(now, now).is_err());

    Ok(())
}
