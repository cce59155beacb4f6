//! Options for reading and writing CSV content

/// Options controlling how CSV content is read and written.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (a single byte).
    pub delimiter: u8,
    /// When set, empty fields are read as this string instead of the
    /// null marker.
    pub replace_missing: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            replace_missing: None,
        }
    }
}

impl CsvOptions {
    /// Create options with the default comma delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace empty fields with the given string on read.
    pub fn with_replace_missing(mut self, value: impl Into<String>) -> Self {
        self.replace_missing = Some(value.into());
        self
    }
}
