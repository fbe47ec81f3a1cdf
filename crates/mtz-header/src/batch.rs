//! Batch block decoding.
//!
//! After `MTZBATS` every batch is stored as:
//!
//! 1. `BH` record: serial, nwords, nintegers, nreals
//! 2. `TITLE` record
//! 3. `nintegers` little-endian int32, the first three repeating
//!    nwords, nintegers and nreals
//! 4. `nreals` little-endian float32
//! 5. `BHCH` record: goniostat axis names

use std::io::{Read, Seek};

use tracing::trace;

use crate::error::{FormatError, Result};
use crate::io::MtzCursor;
use crate::record::{BatchHeader, HeaderRecord, Keyword, decode_record};
use crate::types::Batch;

/// Number of leading integer words that repeat the batch lengths.
const LENGTH_WORDS: usize = 3;

/// Decode `count` consecutive batches.
pub(crate) fn read_batches<R: Read + Seek>(
    cursor: &mut MtzCursor<R>,
    count: usize,
) -> Result<Vec<Batch>> {
    (0..count).map(|index| read_batch(cursor, index)).collect()
}

/// Decode one batch; `index` is its position in the batch block.
pub(crate) fn read_batch<R: Read + Seek>(
    cursor: &mut MtzCursor<R>,
    index: usize,
) -> Result<Batch> {
    let bh = match next_record(cursor)? {
        HeaderRecord::Bh(bh) => bh,
        other => return Err(unexpected(index, Keyword::Bh, &other)),
    };
    let title = match next_record(cursor)? {
        HeaderRecord::Title(title) => title,
        other => return Err(unexpected(index, Keyword::Title, &other)),
    };

    let (nintegers, nreals) = checked_lengths(&bh)?;
    let found = [cursor.read_i32()?, cursor.read_i32()?, cursor.read_i32()?];
    let declared = [bh.nwords, bh.nintegers, bh.nreals];
    if found != declared {
        return Err(FormatError::BatchLengthMismatch {
            serial: bh.serial,
            declared,
            found,
        }
        .into());
    }

    let integers = cursor.read_i32s(nintegers - LENGTH_WORDS)?;
    let reals = cursor.read_f32s(nreals)?;

    let bhch = match next_record(cursor)? {
        HeaderRecord::Bhch(names) => names,
        other => return Err(unexpected(index, Keyword::Bhch, &other)),
    };

    trace!(serial = bh.serial, index, "decoded batch");
    Ok(Batch {
        serial: bh.serial,
        title,
        integers,
        reals,
        bhch,
    })
}

/// Validate the declared lengths and convert them to element counts.
fn checked_lengths(bh: &BatchHeader) -> std::result::Result<(usize, usize), FormatError> {
    let invalid = || FormatError::InvalidBatchLengths {
        serial: bh.serial,
        nwords: bh.nwords,
        nintegers: bh.nintegers,
        nreals: bh.nreals,
    };
    let nintegers = usize::try_from(bh.nintegers).map_err(|_| invalid())?;
    let nreals = usize::try_from(bh.nreals).map_err(|_| invalid())?;
    let total = i64::from(bh.nintegers) + i64::from(bh.nreals);
    if nintegers < LENGTH_WORDS || i64::from(bh.nwords) != total {
        return Err(invalid());
    }
    Ok((nintegers, nreals))
}

fn next_record<R: Read + Seek>(cursor: &mut MtzCursor<R>) -> Result<HeaderRecord> {
    let raw = cursor.read_record()?;
    Ok(decode_record(&raw)?)
}

fn unexpected(index: usize, expected: Keyword, found: &HeaderRecord) -> crate::error::MtzError {
    FormatError::UnexpectedBatchRecord {
        index,
        expected,
        found: found.keyword(),
    }
    .into()
}
