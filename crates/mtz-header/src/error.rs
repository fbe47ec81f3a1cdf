//! Error types for MTZ header decoding.
//!
//! Two kinds of failure are kept apart:
//! - [`FormatError`]: the bytes do not have the expected binary or textual shape
//! - [`InconsistencyError`]: every record is well formed but records disagree
//!   with each other (declared counts, batch serials, dataset ids)

use std::path::PathBuf;
use thiserror::Error;

use crate::record::Keyword;

/// Errors that can occur when decoding an MTZ header.
#[derive(Debug, Error)]
pub enum MtzError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed file or record.
    #[error("malformed MTZ header: {0}")]
    Format(#[from] FormatError),

    /// Records are individually valid but contradict each other.
    #[error("inconsistent MTZ header: {0}")]
    Inconsistent(#[from] InconsistencyError),
}

impl MtzError {
    /// True for structural corruption of the file.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// True for cross-record mismatches.
    #[must_use]
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, Self::Inconsistent(_))
    }
}

/// The raw bytes violate the expected shape of an MTZ header.
#[derive(Debug, Error)]
pub enum FormatError {
    /// File does not start with `MTZ `.
    #[error("missing MTZ magic, found {found:02x?}")]
    BadMagic { found: [u8; 4] },

    /// Machine stamp is not the little-endian IEEE stamp.
    #[error("unsupported number format stamp {found:02x?}")]
    UnsupportedNumberFormat { found: [u8; 4] },

    /// Header word offset points into the preamble.
    #[error("invalid header word offset {offset}")]
    InvalidHeaderOffset { offset: i32 },

    /// Stream ended inside a record or binary block.
    #[error("unexpected end of file at byte {offset}")]
    Truncated { offset: u64 },

    /// Keyword outside the known record set.
    #[error("unrecognized header keyword {keyword:?}")]
    UnknownKeyword { keyword: String },

    /// Wrong number of fields for a keyword.
    #[error("{keyword} record expects {expected} fields, found {found}")]
    FieldCount {
        keyword: Keyword,
        expected: &'static str,
        found: usize,
    },

    /// Field could not be converted to its declared type.
    #[error("{keyword} record: cannot parse {value:?} as {expected}")]
    InvalidField {
        keyword: Keyword,
        value: String,
        expected: &'static str,
    },

    /// Quoted field is never closed.
    #[error("{keyword} record: unterminated quote")]
    UnterminatedQuote { keyword: Keyword },

    /// Record appears in a section where it is not allowed.
    #[error("{keyword} record is not allowed in the {section} section")]
    MisplacedRecord {
        keyword: Keyword,
        section: &'static str,
    },

    /// Batch sub-sequence has a different record than required.
    #[error("batch {index}: expected {expected} record, found {found}")]
    UnexpectedBatchRecord {
        index: usize,
        expected: Keyword,
        found: Keyword,
    },

    /// In-stream batch lengths disagree with the `BH` record.
    #[error(
        "batch {serial}: BH declares {declared:?} words/integers/reals, stream holds {found:?}"
    )]
    BatchLengthMismatch {
        serial: i32,
        declared: [i32; 3],
        found: [i32; 3],
    },

    /// `nwords` is not `nintegers + nreals`, or a count is out of range.
    #[error("batch {serial}: invalid lengths nwords={nwords} nintegers={nintegers} nreals={nreals}")]
    InvalidBatchLengths {
        serial: i32,
        nwords: i32,
        nintegers: i32,
        nreals: i32,
    },

    /// Header has more records than the configured limit.
    #[error("header exceeds the limit of {limit} records")]
    RecordLimit { limit: usize },

    /// Record cannot be rendered into a fixed 80-byte line.
    #[error("{keyword} record cannot be encoded: {message}")]
    Unencodable { keyword: Keyword, message: String },
}

/// Records disagree with each other.
#[derive(Debug, Error)]
pub enum InconsistencyError {
    /// NCOL column count differs from the COLUMN records.
    #[error("NCOL declares {declared} columns, header has {found}")]
    ColumnCount { declared: i32, found: usize },

    /// NCOL batch count differs from the decoded batches.
    #[error("NCOL declares {declared} batches, decoded {found}")]
    BatchCount { declared: i32, found: usize },

    /// BATCH serials differ from the decoded batch serials.
    #[error("BATCH records list serials {declared:?}, batch block holds {found:?}")]
    BatchSerials { declared: Vec<i32>, found: Vec<i32> },

    /// NDIF differs from the number of distinct dataset ids.
    #[error("NDIF declares {declared} datasets, found ids {found:?}")]
    DatasetCount { declared: i32, found: Vec<i32> },

    /// Column references a dataset id with no dataset.
    #[error("column {column:?} references unknown dataset {dataset_id}")]
    UnresolvedDataset { column: String, dataset_id: i32 },

    /// Record class occurs an unexpected number of times.
    #[error("expected {expected} {keyword} record for {context}, found {found}")]
    Cardinality {
        keyword: Keyword,
        context: String,
        expected: &'static str,
        found: usize,
    },
}

/// Result type alias for MTZ operations.
pub type Result<T> = std::result::Result<T, MtzError>;

impl FormatError {
    /// Create an InvalidField error.
    pub fn invalid_field(keyword: Keyword, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            keyword,
            value: value.into(),
            expected,
        }
    }

    /// Create an Unencodable error.
    pub fn unencodable(keyword: Keyword, message: impl Into<String>) -> Self {
        Self::Unencodable {
            keyword,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MtzError::from(FormatError::UnknownKeyword {
            keyword: "FOO".to_string(),
        });
        assert_eq!(
            format!("{err}"),
            "malformed MTZ header: unrecognized header keyword \"FOO\""
        );

        let err = MtzError::from(InconsistencyError::ColumnCount {
            declared: 3,
            found: 2,
        });
        assert_eq!(
            format!("{err}"),
            "inconsistent MTZ header: NCOL declares 3 columns, header has 2"
        );
    }

    #[test]
    fn test_error_kinds() {
        let format: MtzError = FormatError::Truncated { offset: 12 }.into();
        assert!(format.is_format_error());
        assert!(!format.is_inconsistency());

        let inconsistent: MtzError = InconsistencyError::BatchCount {
            declared: 1,
            found: 0,
        }
        .into();
        assert!(inconsistent.is_inconsistency());
        assert!(!inconsistent.is_format_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: MtzError = io_err.into();
        assert!(matches!(err, MtzError::Io(_)));
    }

    #[test]
    fn test_field_errors_name_keyword() {
        let err = FormatError::invalid_field(Keyword::Ncol, "abc", "integer");
        assert_eq!(
            format!("{err}"),
            "NCOL record: cannot parse \"abc\" as integer"
        );
    }
}
