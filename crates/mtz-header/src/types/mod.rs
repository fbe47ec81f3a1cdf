//! Core types for MTZ header handling.
//!
//! This module provides the entities reconstructed from header records:
//! columns, datasets, batches and the header aggregate, plus reader options.

mod column;
mod dataset;
mod header;
mod options;

pub use column::{Column, ColumnType};
pub use dataset::{Batch, Dataset};
pub use header::Header;
pub use options::MtzReaderOptions;
