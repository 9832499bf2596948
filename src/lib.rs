//! Append-only log persistence:
//! typed records are serialized to per-type, per-day text files under a
//! configured root directory, rotating to a new file when a size threshold
//! is exceeded.
//!
//! ## Features
//!
//! - One file per record type per calendar day:
//!   `{root}/{TypeName}/{TypeName}_{yyyy-MM-dd}.log`
//! - Self-describing, human-readable record text separated by a fixed
//!   unique token, so a file can later be split back into records
//! - Size-based rotation guarded by a per-path advisory file lock, safe
//!   across threads and across processes sharing one root directory
//! - Single and batch appends; a batch is always one append call
//! - One-time, concurrency-safe configuration from a named option set
//!
//! ## Example
//!
//! ```rust
//! use daylog::{FileWriter, LogRecord, Options};
//! use serde::Serialize;
//!
//! // Define an application-specific record type
//! #[derive(Serialize)]
//! struct RequestInfo {
//!     url: String,
//!     status: u16,
//! }
//!
//! impl LogRecord for RequestInfo {
//!     const TYPE_NAME: &'static str = "RequestInfo";
//! }
//!
//! let temp_dir = tempfile::tempdir().unwrap();
//! let options = Options::new([
//!     ("RootDirectory", temp_dir.path().to_str().unwrap()),
//!     ("MaxLength", "1"), // megabytes
//! ]);
//!
//! let writer = FileWriter::new();
//! writer.init(&options).unwrap();
//!
//! // Append one record
//! writer
//!     .write(Some(&RequestInfo {
//!         url: "/orders/42".to_string(),
//!         status: 200,
//!     }))
//!     .unwrap();
//!
//! // Append a batch with a single file operation
//! let batch = vec![
//!     RequestInfo { url: "/a".to_string(), status: 200 },
//!     RequestInfo { url: "/b".to_string(), status: 404 },
//! ];
//! writer.write_batch(&batch).unwrap();
//! ```

mod appender;
mod config;
mod options;
mod record;
mod serializer;
mod writer;

pub(crate) mod testing;

pub mod errors;

pub use config::Config;
pub use options::Options;
pub use record::LogRecord;
pub use serializer::split_blocks;
pub use serializer::SEPARATOR;
pub use writer::FileWriter;
pub use writer::MAX_LENGTH_OPTION;
pub use writer::ROOT_DIRECTORY_OPTION;
