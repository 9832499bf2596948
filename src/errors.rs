use std::io;

/// Error raised by [`FileWriter::init`](crate::FileWriter::init) when the
/// writer cannot be configured.
#[derive(Debug)]
#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("writer configuration has no 'RootDirectory' option")]
    MissingRootDirectory,

    #[error("failed to create root directory '{dir}'")]
    CreateRootDirectory {
        dir: String,
        #[source]
        source: io::Error,
    },
}

/// Error indicating that a record could not be converted to text.
#[derive(Debug)]
#[derive(thiserror::Error)]
#[error("failed to serialize record of type '{type_name}'")]
pub struct SerializationError {
    pub type_name: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl SerializationError {
    pub fn new(type_name: &'static str, source: serde_json::Error) -> Self {
        Self { type_name, source }
    }
}

/// Error raised by the write operations.
///
/// Serialization and I/O failures are propagated as-is; the writer never
/// swallows or logs its own errors, since it is itself the logging mechanism.
#[derive(Debug)]
#[derive(thiserror::Error)]
pub enum WriteError {
    #[error("writer is not initialized; call FileWriter::init first")]
    NotInitialized,

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Error indicating that a declared operation has no implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(thiserror::Error)]
#[error("operation '{operation}' is not supported by this writer")]
pub struct NotSupported {
    pub operation: &'static str,
}

impl NotSupported {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// Error indicating that a file name is not a valid rotated log file name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(thiserror::Error)]
#[error("invalid rotated log file name: {bad_file_name}: {reason}")]
pub struct InvalidRotatedFileName {
    pub bad_file_name: String,
    pub reason: String,
}

impl InvalidRotatedFileName {
    pub fn new(bad_file_name: impl ToString, reason: impl ToString) -> Self {
        Self {
            bad_file_name: bad_file_name.to_string(),
            reason: reason.to_string(),
        }
    }
}
