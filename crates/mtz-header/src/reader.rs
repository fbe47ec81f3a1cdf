//! MTZ header reader.
//!
//! Decoding runs in three steps: the 12-byte preamble locates the header, the
//! primary header is read up to `END`, and the post-header section (history
//! and batches) is read up to `MTZENDOFHEADERS`. The collected records are
//! then cross-checked and assembled into a [`Header`].

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::{debug, trace};

use crate::batch::read_batches;
use crate::error::{FormatError, MtzError, Result};
use crate::extract::{expect_at_most_one, expect_one, extract_columns, extract_datasets, is_extracted};
use crate::io::MtzCursor;
use crate::record::{ColumnCounts, HeaderRecord, Keyword, decode_record};
use crate::types::{Batch, Header, MtzReaderOptions};
use crate::validate::{check_batches, check_column_count};

/// File magic.
pub const MAGIC: [u8; 4] = *b"MTZ ";

/// Machine stamp for little-endian IEEE floats and integers.
pub const NUMBER_FORMAT: [u8; 4] = [0x44, 0x41, 0x00, 0x00];

/// Magic, header offset and number format.
const PREAMBLE_LEN: u64 = 12;

const PRIMARY_SECTION: &str = "primary header";
const POST_HEADER_SECTION: &str = "post-header";

/// MTZ header reader.
///
/// Reads from any seekable stream. The stream is sought once to the header
/// offset and read forward from there.
pub struct MtzReader<R: Read + Seek> {
    cursor: MtzCursor<R>,
    options: MtzReaderOptions,
}

impl<R: Read + Seek> MtzReader<R> {
    /// Create a new MTZ reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, MtzReaderOptions::default())
    }

    /// Create a new MTZ reader with options.
    pub fn with_options(reader: R, options: MtzReaderOptions) -> Self {
        Self {
            cursor: MtzCursor::new(reader),
            options,
        }
    }

    /// Decode and validate the whole header.
    pub fn read_header(mut self) -> Result<Header> {
        let header_start = self.read_preamble()?;
        debug!(header_start, "located MTZ header");
        self.cursor.seek(header_start)?;

        let records = self.read_primary_header()?;
        debug!(records = records.len(), "read primary header");

        let counts = expect_one(
            records.iter().filter_map(|record| match record {
                HeaderRecord::Ncol(counts) => Some(*counts),
                _ => None,
            }),
            Keyword::Ncol,
            "header",
        )?;
        let nbatch = usize::try_from(counts.batches).map_err(|_| {
            FormatError::invalid_field(Keyword::Ncol, counts.batches.to_string(), "batch count")
        })?;

        let (history, batches) = self.read_post_header(nbatch)?;
        debug!(
            history = history.len(),
            batches = batches.len(),
            "read post-header section"
        );

        let header = assemble(records, &counts, history, batches)?;
        debug!(
            columns = header.columns.len(),
            datasets = header.datasets.len(),
            "assembled header"
        );
        Ok(header)
    }

    /// Check the preamble and return the byte offset of the first record.
    fn read_preamble(&mut self) -> Result<u64> {
        let magic = self.cursor.read_array::<4>()?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic }.into());
        }
        let offset = self.cursor.read_i32()?;
        let stamp = self.cursor.read_array::<4>()?;
        if stamp != NUMBER_FORMAT {
            return Err(FormatError::UnsupportedNumberFormat { found: stamp }.into());
        }

        let start = (i64::from(offset) - 1) * 4;
        u64::try_from(start)
            .ok()
            .filter(|start| *start >= PREAMBLE_LEN)
            .ok_or_else(|| FormatError::InvalidHeaderOffset { offset }.into())
    }

    /// Records up to `END`, which is consumed and dropped.
    fn read_primary_header(&mut self) -> Result<Vec<HeaderRecord>> {
        let mut records = Vec::new();
        loop {
            let record = self.next_record()?;
            match record.keyword() {
                Keyword::End => return Ok(records),
                keyword @ (Keyword::MtzHist
                | Keyword::MtzBats
                | Keyword::MtzEndOfHeaders
                | Keyword::Bh
                | Keyword::Bhch) => {
                    return Err(FormatError::MisplacedRecord {
                        keyword,
                        section: PRIMARY_SECTION,
                    }
                    .into());
                }
                _ => {}
            }
            if let Some(limit) = self.options.record_limit
                && records.len() >= limit
            {
                return Err(FormatError::RecordLimit { limit }.into());
            }
            records.push(record);
        }
    }

    /// History lines and batches up to `MTZENDOFHEADERS`.
    fn read_post_header(&mut self, nbatch: usize) -> Result<(Vec<String>, Vec<Batch>)> {
        let mut history = Vec::new();
        let mut batches = Vec::new();
        loop {
            match self.next_record()? {
                HeaderRecord::MtzHist(count) => {
                    for _ in 0..count {
                        let raw = self.cursor.read_record()?;
                        history.push(self.options.history_line(&String::from_utf8_lossy(&raw)));
                    }
                }
                HeaderRecord::MtzBats => {
                    batches.extend(read_batches(&mut self.cursor, nbatch)?);
                }
                HeaderRecord::MtzEndOfHeaders => return Ok((history, batches)),
                other => {
                    return Err(FormatError::MisplacedRecord {
                        keyword: other.keyword(),
                        section: POST_HEADER_SECTION,
                    }
                    .into());
                }
            }
        }
    }

    fn next_record(&mut self) -> Result<HeaderRecord> {
        let offset = self.cursor.tell();
        let raw = self.cursor.read_record()?;
        let record = decode_record(&raw)?;
        trace!(offset, keyword = %record.keyword(), "decoded record");
        Ok(record)
    }
}

impl MtzReader<File> {
    /// Open an MTZ file for reading.
    ///
    /// # Arguments
    /// * `path` - Path to the MTZ file
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, MtzReaderOptions::default())
    }

    /// Open an MTZ file with options.
    pub fn open_with_options(path: &Path, options: MtzReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MtzError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                MtzError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read the header of an MTZ file.
///
/// This is a convenience function that opens the file and decodes its header.
///
/// # Arguments
/// * `path` - Path to the MTZ file
pub fn read_mtz_header(path: &Path) -> Result<Header> {
    MtzReader::open(path)?.read_header()
}

/// Read the header of an MTZ file with options.
pub fn read_mtz_header_with_options(path: &Path, options: MtzReaderOptions) -> Result<Header> {
    MtzReader::open_with_options(path, options)?.read_header()
}

/// Cross-check the collected records and build the header.
///
/// Count checks see the `BATCH` records, so they run before extracted
/// records are dropped.
fn assemble(
    mut records: Vec<HeaderRecord>,
    counts: &ColumnCounts,
    history: Vec<String>,
    batches: Vec<Batch>,
) -> Result<Header> {
    let version = expect_one(
        records.iter().filter_map(|record| match record {
            HeaderRecord::Vers(version) => Some(version.clone()),
            _ => None,
        }),
        Keyword::Vers,
        "header",
    )?;
    let title = expect_one(
        records.iter().filter_map(|record| match record {
            HeaderRecord::Title(title) => Some(title.clone()),
            _ => None,
        }),
        Keyword::Title,
        "header",
    )?;

    check_column_count(counts, &records)?;
    check_batches(counts, &records, &batches)?;

    let ndif = expect_at_most_one(
        records.iter().filter_map(|record| match record {
            HeaderRecord::Ndif(count) => Some(*count),
            _ => None,
        }),
        Keyword::Ndif,
        "header",
    )?
    .unwrap_or(0);
    let datasets = extract_datasets(&records, ndif)?;
    let columns = extract_columns(&records, &datasets)?;

    records.retain(|record| !is_extracted(record.keyword()));

    Ok(Header {
        version,
        title,
        records,
        history,
        batches,
        datasets,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InconsistencyError;
    use std::io::Cursor;

    fn preamble(offset: i32, stamp: [u8; 4]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes.extend_from_slice(&stamp);
        bytes
    }

    fn file(records: &[HeaderRecord]) -> Vec<u8> {
        let mut bytes = preamble(4, NUMBER_FORMAT);
        for record in records {
            bytes.extend_from_slice(&record.encode().unwrap());
        }
        bytes
    }

    fn minimal(counts: ColumnCounts) -> Vec<HeaderRecord> {
        vec![
            HeaderRecord::Vers("MTZ:V1.1".to_string()),
            HeaderRecord::Title("test".to_string()),
            HeaderRecord::Ncol(counts),
            HeaderRecord::End,
            HeaderRecord::MtzEndOfHeaders,
        ]
    }

    fn read(bytes: Vec<u8>) -> Result<Header> {
        MtzReader::new(Cursor::new(bytes)).read_header()
    }

    #[test]
    fn test_minimal_header() {
        let header = read(file(&minimal(ColumnCounts::default()))).unwrap();
        assert_eq!(header.version, "MTZ:V1.1");
        assert_eq!(header.title, "test");
        assert_eq!(header.records, vec![HeaderRecord::Ncol(ColumnCounts::default())]);
        assert!(header.columns.is_empty());
        assert!(header.datasets.is_empty());
        assert!(header.batches.is_empty());
        assert!(header.history.is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = file(&minimal(ColumnCounts::default()));
        bytes[..4].copy_from_slice(b"XTZ ");
        let err = read(bytes).unwrap_err();
        assert!(matches!(err, MtzError::Format(FormatError::BadMagic { .. })));
    }

    #[test]
    fn test_number_format() {
        let mut bytes = preamble(4, [0x11, 0x11, 0x00, 0x00]);
        bytes.extend_from_slice(&HeaderRecord::End.encode().unwrap());
        let err = read(bytes).unwrap_err();
        assert!(matches!(
            err,
            MtzError::Format(FormatError::UnsupportedNumberFormat { .. })
        ));
    }

    #[test]
    fn test_offset_inside_preamble() {
        for offset in [-3, 0, 1, 3] {
            let err = read(preamble(offset, NUMBER_FORMAT)).unwrap_err();
            assert!(matches!(
                err,
                MtzError::Format(FormatError::InvalidHeaderOffset { .. })
            ));
        }
    }

    #[test]
    fn test_missing_end_is_truncated() {
        let records = [HeaderRecord::Vers("MTZ:V1.1".to_string())];
        let err = read(file(&records)).unwrap_err();
        assert!(matches!(err, MtzError::Format(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_record_limit() {
        let options = MtzReaderOptions::new().with_record_limit(2);
        let reader = MtzReader::with_options(
            Cursor::new(file(&minimal(ColumnCounts::default()))),
            options,
        );
        let err = reader.read_header().unwrap_err();
        assert!(matches!(
            err,
            MtzError::Format(FormatError::RecordLimit { limit: 2 })
        ));
    }

    #[test]
    fn test_misplaced_records() {
        let mut records = minimal(ColumnCounts::default());
        records.insert(1, HeaderRecord::MtzBats);
        let err = read(file(&records)).unwrap_err();
        assert!(matches!(
            err,
            MtzError::Format(FormatError::MisplacedRecord {
                keyword: Keyword::MtzBats,
                section: PRIMARY_SECTION,
            })
        ));

        let mut records = minimal(ColumnCounts::default());
        records.insert(4, HeaderRecord::Symm("X,Y,Z".to_string()));
        let err = read(file(&records)).unwrap_err();
        assert!(matches!(
            err,
            MtzError::Format(FormatError::MisplacedRecord {
                keyword: Keyword::Symm,
                section: POST_HEADER_SECTION,
            })
        ));
    }

    #[test]
    fn test_duplicate_title() {
        let mut records = minimal(ColumnCounts::default());
        records.insert(2, HeaderRecord::Title("again".to_string()));
        let err = read(file(&records)).unwrap_err();
        assert!(matches!(
            err,
            MtzError::Inconsistent(InconsistencyError::Cardinality {
                keyword: Keyword::Title,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_ncol() {
        let mut records = minimal(ColumnCounts::default());
        records.remove(2);
        let err = read(file(&records)).unwrap_err();
        assert!(err.is_inconsistency());
    }

    #[test]
    fn test_negative_batch_count() {
        let records = minimal(ColumnCounts {
            columns: 0,
            reflections: 0,
            batches: -1,
        });
        let err = read(file(&records)).unwrap_err();
        assert!(matches!(
            err,
            MtzError::Format(FormatError::InvalidField {
                keyword: Keyword::Ncol,
                ..
            })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = read_mtz_header(Path::new("/nonexistent/data.mtz")).unwrap_err();
        assert!(matches!(err, MtzError::FileNotFound { .. }));
    }
}
