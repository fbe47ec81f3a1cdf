//! Cross-record consistency checks.
//!
//! Each check compares a count declared in the header against what was
//! actually decoded and fails with an [`InconsistencyError`].

use crate::error::InconsistencyError;
use crate::record::{ColumnCounts, HeaderRecord};
use crate::types::Batch;

type Result<T> = std::result::Result<T, InconsistencyError>;

/// `NCOL` column count must match the number of `COL`/`COLUMN` records.
pub(crate) fn check_column_count(counts: &ColumnCounts, records: &[HeaderRecord]) -> Result<()> {
    let found = records
        .iter()
        .filter(|record| record.as_column().is_some())
        .count();
    if !declared_matches(counts.columns, found) {
        return Err(InconsistencyError::ColumnCount {
            declared: counts.columns,
            found,
        });
    }
    Ok(())
}

/// `NCOL` batch count and `BATCH` serials must match the decoded batch block.
pub(crate) fn check_batches(
    counts: &ColumnCounts,
    records: &[HeaderRecord],
    batches: &[Batch],
) -> Result<()> {
    if !declared_matches(counts.batches, batches.len()) {
        return Err(InconsistencyError::BatchCount {
            declared: counts.batches,
            found: batches.len(),
        });
    }

    let declared: Vec<i32> = records
        .iter()
        .filter_map(|record| match record {
            HeaderRecord::Batch(serials) => Some(serials.as_slice()),
            _ => None,
        })
        .flatten()
        .copied()
        .collect();
    let found: Vec<i32> = batches.iter().map(|batch| batch.serial).collect();
    if declared != found {
        return Err(InconsistencyError::BatchSerials { declared, found });
    }
    Ok(())
}

fn declared_matches(declared: i32, found: usize) -> bool {
    usize::try_from(declared).ok() == Some(found)
}
