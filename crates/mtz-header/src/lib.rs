//! MTZ reflection file header decoder.
//!
//! This crate decodes the metadata block of MTZ files, the binary format used
//! by CCP4 for X-ray diffraction reflection data. Reflection data itself is
//! not read.
//!
//! # Features
//!
//! - Preamble check (magic, header offset, little-endian number format)
//! - Typed decoding of every header keyword, with re-encoding to 80-byte lines
//! - History lines and per-batch scan metadata
//! - Datasets and columns rebuilt from the scattered records
//! - Cross-record checks of declared column, batch and dataset counts
//! - Optional `serde::Serialize` for the model (with `serde` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mtz_header::read_mtz_header;
//!
//! let header = read_mtz_header(Path::new("data.mtz")).unwrap();
//! println!("{} ({} columns)", header.title, header.columns.len());
//! for column in &header.columns {
//!     println!("{:<12} {}", column.name, column.column_type.description());
//! }
//! ```
//!
//! # Errors
//!
//! Malformed bytes give [`FormatError`]; records that are individually valid
//! but contradict each other give [`InconsistencyError`]:
//!
//! ```
//! use std::io::Cursor;
//! use mtz_header::{ColumnCounts, HeaderRecord, MAGIC, MtzReader, NUMBER_FORMAT};
//!
//! let mut bytes = MAGIC.to_vec();
//! bytes.extend_from_slice(&4i32.to_le_bytes());
//! bytes.extend_from_slice(&NUMBER_FORMAT);
//! for record in [
//!     HeaderRecord::Vers("MTZ:V1.1".into()),
//!     HeaderRecord::Title("demo".into()),
//!     HeaderRecord::Ncol(ColumnCounts { columns: 3, reflections: 0, batches: 0 }),
//!     HeaderRecord::End,
//!     HeaderRecord::MtzEndOfHeaders,
//! ] {
//!     bytes.extend_from_slice(&record.encode().unwrap());
//! }
//!
//! let err = MtzReader::new(Cursor::new(bytes)).read_header().unwrap_err();
//! assert!(err.is_inconsistency());
//! ```

mod batch;
mod error;
mod extract;
pub mod io;
mod reader;
pub mod record;
mod types;
mod validate;

// Re-export error types
pub use error::{FormatError, InconsistencyError, MtzError, Result};

// Re-export core types
pub use record::{
    BatchHeader, ColumnCounts, ColumnGroup, ColumnRecord, ColumnSource, DatasetCell, DatasetName,
    DatasetWavelength, HeaderRecord, Keyword, Resolution, SymmetryInfo, decode_record,
};
pub use types::{Batch, Column, ColumnType, Dataset, Header, MtzReaderOptions};

// Re-export reader functionality
pub use reader::{
    MAGIC, MtzReader, NUMBER_FORMAT, read_mtz_header, read_mtz_header_with_options,
};
