use std::fs;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use log::info;
use time::Date;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::appender;
use crate::errors::ConfigError;
use crate::errors::NotSupported;
use crate::errors::WriteError;
use crate::record::LogRecord;
use crate::serializer;
use crate::Config;
use crate::Options;

/// Option key for the root directory, required at init.
pub const ROOT_DIRECTORY_OPTION: &str = "RootDirectory";

/// Option key for the maximum file size in megabytes, optional at init.
pub const MAX_LENGTH_OPTION: &str = "MaxLength";

const DEFAULT_MAX_LENGTH_MB: u64 = 100;

/// Appends typed records to per-type, per-day text files.
///
/// A `FileWriter` is configured exactly once via [`init`](Self::init) and is
/// then safe to share across threads: every write resolves its target path
/// from the record's declared type and the current date, serializes the
/// record, and appends it under a per-path file lock, rotating the file when
/// it would exceed the configured size.
#[derive(Debug, Default)]
pub struct FileWriter {
    config: Mutex<Option<Arc<Config>>>,
}

impl FileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the writer from a named option set.
    ///
    /// Reads `RootDirectory` (required) and `MaxLength` (optional,
    /// megabytes, default 100; unparseable values fall back to the
    /// default). Creates the root directory on disk and normalizes its
    /// trailing separator.
    ///
    /// The whole body runs under one mutex: only the first successful call
    /// takes effect, later calls are no-ops. `RootDirectory` is still
    /// validated on those later calls.
    pub fn init(&self, options: &Options) -> Result<(), ConfigError> {
        let mut config = lock_unpoisoned(&self.config);

        let root = options.get(ROOT_DIRECTORY_OPTION).unwrap_or_default();
        if root.is_empty() {
            return Err(ConfigError::MissingRootDirectory);
        }

        if config.is_some() {
            return Ok(());
        }

        let root_dir = init_root_dir(root)?;
        let max_mb =
            options.get_megabytes_or(MAX_LENGTH_OPTION, DEFAULT_MAX_LENGTH_MB);

        // A megabyte count too large to express in bytes is as invalid as
        // an unparseable one and falls back to the same default.
        let max_file_size = max_mb
            .checked_mul(1024 * 1024)
            .unwrap_or(DEFAULT_MAX_LENGTH_MB * 1024 * 1024);

        info!(
            "FileWriter initialized: root_dir={}, max_file_size={} bytes",
            root_dir, max_file_size
        );

        *config = Some(Arc::new(Config {
            root_dir,
            max_file_size: Some(max_file_size),
        }));

        Ok(())
    }

    /// Returns the configured root directory, for diagnostics and tests.
    pub fn root_dir(&self) -> Option<String> {
        self.current_config().map(|c| c.root_dir.clone())
    }

    /// Returns the path the next write of `R` would append to.
    ///
    /// Purely derived from the root directory, `R::TYPE_NAME` and the
    /// current local date; no directory is created.
    pub fn resolve_path<R: LogRecord>(&self) -> Result<String, WriteError> {
        let config = self.current_config().ok_or(WriteError::NotInitialized)?;
        Ok(config.log_path(R::TYPE_NAME, today()))
    }

    /// Appends one record to the log file of its declared type.
    ///
    /// `None` is a no-op, not an error.
    pub fn write<R: LogRecord>(
        &self,
        record: Option<&R>,
    ) -> Result<(), WriteError> {
        let Some(record) = record else {
            return Ok(());
        };

        let config = self.current_config().ok_or(WriteError::NotInitialized)?;
        let path = config.log_path(R::TYPE_NAME, today());

        let text = serializer::to_text(record)?;
        let contents = serializer::block(&text);

        appender::append_all_text(&path, &contents, config.max_file_size())?;
        Ok(())
    }

    /// Appends a batch of records to the log file of their declared type.
    ///
    /// The path is resolved once from `R::TYPE_NAME` and the whole batch is
    /// written with exactly one append, never one per record. A
    /// serialization failure of any element aborts the batch before any
    /// byte is written. An empty slice is a no-op.
    pub fn write_batch<R: LogRecord>(
        &self,
        records: &[R],
    ) -> Result<(), WriteError> {
        if records.is_empty() {
            return Ok(());
        }

        let config = self.current_config().ok_or(WriteError::NotInitialized)?;
        let path = config.log_path(R::TYPE_NAME, today());

        let mut buf = String::new();
        for record in records {
            let text = serializer::to_text(record)?;
            buf.push_str(&serializer::block(&text));
        }

        if buf.is_empty() {
            return Ok(());
        }

        appender::append_all_text(&path, &buf, config.max_file_size())?;
        Ok(())
    }

    /// Retrieves one record by id.
    ///
    /// Declared but not implemented: a reverse mapping from record identity
    /// to file offsets does not exist in this write-only core.
    pub fn get_by_id<R: LogRecord>(
        &self,
        _id: Uuid,
    ) -> Result<R, NotSupported> {
        Err(NotSupported::new("get_by_id"))
    }

    /// Retrieves the records written between two instants.
    ///
    /// Declared but not implemented, same as [`get_by_id`](Self::get_by_id).
    pub fn get_range<R: LogRecord>(
        &self,
        _from: OffsetDateTime,
        _to: OffsetDateTime,
    ) -> Result<Vec<R>, NotSupported> {
        Err(NotSupported::new("get_range"))
    }

    fn current_config(&self) -> Option<Arc<Config>> {
        lock_unpoisoned(&self.config).clone()
    }
}

/// Locks a mutex, recovering the guard if a panicking thread poisoned it.
/// The guarded state is a plain `Option<Arc<Config>>` which cannot be left
/// half-written.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Creates the root directory and normalizes its trailing separator.
fn init_root_dir(value: &str) -> Result<String, ConfigError> {
    let root_dir = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{}/", value)
    };

    fs::create_dir_all(&root_dir).map_err(|e| {
        ConfigError::CreateRootDirectory {
            dir: root_dir.clone(),
            source: e,
        }
    })?;

    Ok(root_dir)
}

/// The current local calendar date; UTC when the local offset cannot be
/// determined.
fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
