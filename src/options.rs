use std::collections::BTreeMap;

/// A named option set, the configuration source consumed by
/// [`FileWriter::init`](crate::FileWriter::init).
///
/// The writer reads two options:
/// - `RootDirectory` (required): base directory for all log files.
/// - `MaxLength` (optional): maximum file size in megabytes, default 100.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    /// Creates an option set from `(key, value)` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Sets one option, replacing any previous value.
    pub fn set(&mut self, key: impl ToString, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Returns the value of an option, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Returns an option parsed as an integer megabyte count.
    ///
    /// Missing or unparseable values fall back to `default_mb` rather than
    /// failing.
    pub(crate) fn get_megabytes_or(&self, key: &str, default_mb: u64) -> u64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default_mb)
    }
}
