use serde::Serialize;

/// A record that can be persisted by the file writer.
///
/// [`TYPE_NAME`](Self::TYPE_NAME) is the declared identity of the record
/// stream and determines which directory and file the record lands in. It is
/// an associated constant of the type the caller names at the call site, so
/// records written through a common declared type share one file even when
/// they carry different shapes.
pub trait LogRecord: Serialize {
    /// Stable stream name, used for directory and file naming.
    ///
    /// Must be a valid path component: no separators, stable across
    /// refactoring if existing files are to keep receiving records.
    const TYPE_NAME: &'static str;
}
