use std::format;

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::errors::InvalidRotatedFileName;

/// `yyyy-MM-dd`, the date component of every log file name.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Configuration for the file writer.
///
/// This struct holds the root directory under which all log files are
/// created and the size threshold that triggers rotation.
///
/// Optional parameters are `Option<T>` in this struct, and default values
/// are evaluated when a getter method is called.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Base directory for storing log files, normalized to end with `/`.
    pub root_dir: String,

    /// Maximum size of a single log file in bytes.
    pub max_file_size: Option<u64>,
}

impl Config {
    /// Creates a new Config with the specified root directory and default
    /// values for other fields.
    pub fn new(root_dir: impl ToString) -> Self {
        Self {
            root_dir: root_dir.to_string(),
            ..Default::default()
        }
    }

    /// Returns the maximum size of a log file in bytes (defaults to 100 MiB).
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(100 * 1024 * 1024)
    }

    /// Returns the full path of the log file for a record type on a given
    /// date.
    ///
    /// The path is purely a function of (root directory, type name, date):
    /// `{root}{TypeName}/{TypeName}_{yyyy-MM-dd}.log`. No directory is
    /// created here.
    pub fn log_path(&self, type_name: &str, date: Date) -> String {
        let file_name = Self::log_file_name(type_name, date);
        format!("{}{}/{}", self.root_dir, type_name, file_name)
    }

    /// Generates the log file name for a record type on a given date.
    ///
    /// The file name format is "{TypeName}_{yyyy-MM-dd}.log".
    pub(crate) fn log_file_name(type_name: &str, date: Date) -> String {
        // DATE_FORMAT is validated at compile time and a Date carries every
        // component it needs, so formatting cannot fail.
        let date = date.format(DATE_FORMAT).expect("valid date format");
        format!("{}_{}.log", type_name, date)
    }

    /// Generates the file name a full log file is renamed to.
    ///
    /// The file name format is "{stem}.{seq:09}.log", where `stem` is the
    /// original file name without the ".log" suffix. The fixed-width
    /// zero-padded sequence keeps rotated files unique and lexically
    /// ordered by creation.
    pub(crate) fn rotated_file_name(stem: &str, seq: u64) -> String {
        format!("{}.{:09}.log", stem, seq)
    }

    /// Parses a rotated log file name and returns its rotation sequence.
    ///
    /// # Arguments
    /// * `file_name` - Name of the rotated file (format:
    ///   "{stem}.{seq}.log")
    /// * `stem` - The original file name without the ".log" suffix
    ///
    /// # Returns
    /// * `Ok(u64)` - The rotation sequence if parsing succeeds
    /// * `Err(InvalidRotatedFileName)` - If the file name format is invalid
    pub(crate) fn parse_rotated_file_name(
        file_name: &str,
        stem: &str,
    ) -> Result<u64, InvalidRotatedFileName> {
        // 1. Strip the ".log" suffix or return an error if it's not there
        let without_suffix =
            file_name.strip_suffix(".log").ok_or_else(|| {
                InvalidRotatedFileName::new(file_name, "has no '.log' suffix")
            })?;

        // 2. Strip the "{stem}." prefix or return an error if it's not there
        let seq = without_suffix
            .strip_prefix(stem)
            .and_then(|s| s.strip_prefix('.'))
            .ok_or_else(|| {
                InvalidRotatedFileName::new(
                    file_name,
                    format!("does not start with '{}.'", stem),
                )
            })?;

        if seq.len() < 9 || !seq.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidRotatedFileName::new(
                file_name,
                "sequence is not at least 9 ascii digits",
            ));
        }

        // 3. Parse the remaining string as an u64
        seq.parse::<u64>().map_err(|e| {
            InvalidRotatedFileName::new(
                file_name,
                format!("cannot parse as u64: {}", e),
            )
        })
    }
}
