//! Reader options.

/// Options for reading MTZ headers.
#[derive(Debug, Clone)]
pub struct MtzReaderOptions {
    /// Trim leading as well as trailing spaces from history lines (default: true).
    pub trim_history: bool,
    /// Maximum number of records in the primary header (default: unlimited).
    pub record_limit: Option<usize>,
}

impl Default for MtzReaderOptions {
    fn default() -> Self {
        Self {
            trim_history: true,
            record_limit: None,
        }
    }
}

impl MtzReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep leading spaces of history lines.
    #[must_use]
    pub fn keep_history_indent(mut self) -> Self {
        self.trim_history = false;
        self
    }

    /// Fail when the primary header holds more than `limit` records.
    #[must_use]
    pub fn with_record_limit(mut self, limit: usize) -> Self {
        self.record_limit = Some(limit);
        self
    }

    /// Normalize one raw history line.
    pub(crate) fn history_line(&self, line: &str) -> String {
        let line = line.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        if self.trim_history {
            line.trim_start().to_string()
        } else {
            line.to_string()
        }
    }
}
