//! MTZ header records.
//!
//! The header is a run of 80-byte ASCII records, each starting with a keyword.
//! [`decode_record`] turns one record into a [`HeaderRecord`] and
//! [`HeaderRecord::encode`] renders it back into its fixed-width line.
//!
//! Most payloads are whitespace separated, with shell-style quoting for names.
//! `COLSRC`, `COLGRP` and `BHCH` use fixed character columns instead:
//!
//! | Keyword | Field widths after `KEYWORD ` |
//! |---------|-------------------------------|
//! | COLSRC  | 30, 1, 36, rest               |
//! | COLGRP  | 31, 31, 5, 2 (hex), 4         |
//! | BHCH    | 9, 9, 9                       |

mod decode;
pub(crate) mod fields;
mod keyword;
mod payload;

pub use decode::decode_record;
pub use keyword::Keyword;
pub use payload::{
    BatchHeader, ColumnCounts, ColumnGroup, ColumnRecord, ColumnSource, DatasetCell, DatasetName,
    DatasetWavelength, Resolution, SymmetryInfo,
};

use crate::error::FormatError;

use fields::{check_width, pad_record, quote};

/// Record length in bytes.
pub const RECORD_LEN: usize = 80;

/// Width of one `BHCH` axis name field.
pub const BHCH_FIELD_LEN: usize = 9;

/// One decoded header record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "keyword", content = "value", rename_all = "UPPERCASE")
)]
pub enum HeaderRecord {
    Vers(String),
    Title(String),
    Ncol(ColumnCounts),
    Cell([f32; 6]),
    Sort([i32; 5]),
    Syminf(SymmetryInfo),
    Symm(String),
    Reso(Resolution),
    Valm(String),
    Col(ColumnRecord),
    Column(ColumnRecord),
    Colsrc(ColumnSource),
    Colgrp(ColumnGroup),
    Ndif(i32),
    Project(DatasetName),
    Crystal(DatasetName),
    Dataset(DatasetName),
    Dcell(DatasetCell),
    Dwavel(DatasetWavelength),
    Batch(Vec<i32>),
    End,
    MtzHist(usize),
    MtzBats,
    MtzEndOfHeaders,
    Bh(BatchHeader),
    Bhch(Vec<String>),
}

impl HeaderRecord {
    /// Keyword introducing this record.
    #[must_use]
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Vers(_) => Keyword::Vers,
            Self::Title(_) => Keyword::Title,
            Self::Ncol(_) => Keyword::Ncol,
            Self::Cell(_) => Keyword::Cell,
            Self::Sort(_) => Keyword::Sort,
            Self::Syminf(_) => Keyword::Syminf,
            Self::Symm(_) => Keyword::Symm,
            Self::Reso(_) => Keyword::Reso,
            Self::Valm(_) => Keyword::Valm,
            Self::Col(_) => Keyword::Col,
            Self::Column(_) => Keyword::Column,
            Self::Colsrc(_) => Keyword::Colsrc,
            Self::Colgrp(_) => Keyword::Colgrp,
            Self::Ndif(_) => Keyword::Ndif,
            Self::Project(_) => Keyword::Project,
            Self::Crystal(_) => Keyword::Crystal,
            Self::Dataset(_) => Keyword::Dataset,
            Self::Dcell(_) => Keyword::Dcell,
            Self::Dwavel(_) => Keyword::Dwavel,
            Self::Batch(_) => Keyword::Batch,
            Self::End => Keyword::End,
            Self::MtzHist(_) => Keyword::MtzHist,
            Self::MtzBats => Keyword::MtzBats,
            Self::MtzEndOfHeaders => Keyword::MtzEndOfHeaders,
            Self::Bh(_) => Keyword::Bh,
            Self::Bhch(_) => Keyword::Bhch,
        }
    }

    /// Column definition carried by `COL` or `COLUMN`.
    #[must_use]
    pub fn as_column(&self) -> Option<&ColumnRecord> {
        match self {
            Self::Col(column) | Self::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Dataset id referenced by a dataset-defining record.
    #[must_use]
    pub fn dataset_id(&self) -> Option<i32> {
        match self {
            Self::Project(named) | Self::Crystal(named) | Self::Dataset(named) => Some(named.id),
            Self::Dcell(cell) => Some(cell.id),
            Self::Dwavel(wavelength) => Some(wavelength.id),
            _ => None,
        }
    }

    /// Render the record as a space-padded 80-byte line.
    pub fn encode(&self) -> Result<[u8; RECORD_LEN], FormatError> {
        let keyword = self.keyword();
        let line = self.to_line()?;
        pad_record(keyword, &line)
    }

    /// Render the record without trailing padding.
    pub fn to_line(&self) -> Result<String, FormatError> {
        let keyword = self.keyword();
        let line = match self {
            Self::Vers(text) | Self::Title(text) | Self::Symm(text) | Self::Valm(text) => {
                format!("{keyword} {text}")
            }
            Self::Ncol(counts) => format!(
                "{keyword} {:>8} {:>12} {:>8}",
                counts.columns, counts.reflections, counts.batches
            ),
            Self::Cell(cell) => format!("{keyword} {}", join_floats(cell)),
            Self::Sort(order) => format!("{keyword} {}", join_ints(order, 3)),
            Self::Syminf(info) => {
                let mut line = format!(
                    "{keyword} {:>3} {:>2} {} {:>5} {} {}",
                    info.operator_count,
                    info.primitive_operator_count,
                    quote(&info.lattice_type),
                    info.space_group_number,
                    quote(&info.space_group_name),
                    quote(&info.point_group),
                );
                if let Some(extra) = &info.extra {
                    line.push(' ');
                    line.push_str(&quote(extra));
                }
                line
            }
            Self::Reso(reso) => format!("{keyword} {} {}", fmt_float(reso.min), fmt_float(reso.max)),
            Self::Col(column) | Self::Column(column) => format!(
                "{keyword} {:<30} {} {:>17} {:>17} {:>4}",
                quote(&column.label),
                column.column_type.code(),
                fmt_float(column.min),
                fmt_float(column.max),
                column.dataset_id
            ),
            Self::Colsrc(source) => {
                check_width(keyword, &source.label, 30)?;
                check_width(keyword, &source.source, 36)?;
                let dataset = source
                    .dataset_id
                    .map(|id| format!("{id:>5}"))
                    .unwrap_or_default();
                format!("{keyword} {:<30} {:<36}{dataset}", source.label, source.source)
            }
            Self::Colgrp(group) => {
                check_width(keyword, &group.label, 30)?;
                check_width(keyword, &group.group_name, 30)?;
                check_width(keyword, &group.group_type, 4)?;
                let position = format!("{:X}", group.position);
                check_width(keyword, &position, 2)?;
                let dataset = group.dataset_id.to_string();
                check_width(keyword, &dataset, 4)?;
                format!(
                    "{keyword} {:<30} {:<30} {:<4} {position:<2}{dataset:>4}",
                    group.label, group.group_name, group.group_type
                )
            }
            Self::Ndif(count) => format!("{keyword} {count:>8}"),
            Self::Project(named) | Self::Crystal(named) | Self::Dataset(named) => {
                format!("{keyword} {:>7} {}", named.id, quote(&named.name))
            }
            Self::Dcell(cell) => format!("{keyword} {:>9} {}", cell.id, join_floats(&cell.cell)),
            Self::Dwavel(wavelength) => format!(
                "{keyword} {:>8} {}",
                wavelength.id,
                fmt_float(wavelength.wavelength)
            ),
            Self::Batch(serials) => format!("{keyword} {}", join_ints(serials, 6)),
            Self::End | Self::MtzBats | Self::MtzEndOfHeaders => keyword.to_string(),
            Self::MtzHist(count) => format!("{keyword} {count:>3}"),
            Self::Bh(bh) => format!(
                "{keyword} {:>8} {:>8} {:>8} {:>8}",
                bh.serial, bh.nwords, bh.nintegers, bh.nreals
            ),
            Self::Bhch(names) => {
                if names.len() > 3 {
                    return Err(FormatError::unencodable(
                        keyword,
                        format!("{} axis names, at most 3 allowed", names.len()),
                    ));
                }
                let mut line = format!("{keyword} ");
                for name in names {
                    check_width(keyword, name, BHCH_FIELD_LEN)?;
                    line.push_str(&format!("{name:<width$}", width = BHCH_FIELD_LEN));
                }
                line
            }
        };
        Ok(line)
    }
}

/// Shortest exact rendering: plain decimal or scientific, whichever is shorter.
fn fmt_float(value: f32) -> String {
    let plain = format!("{value:?}");
    let scientific = format!("{value:e}");
    if scientific.len() < plain.len() {
        scientific
    } else {
        plain
    }
}

fn join_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| fmt_float(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_ints(values: &[i32], width: usize) -> String {
    values
        .iter()
        .map(|v| format!("{v:>width$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    fn roundtrip(record: &HeaderRecord) -> HeaderRecord {
        let bytes = record.encode().unwrap();
        decode_record(&bytes).unwrap()
    }

    #[test]
    fn test_column_line_layout() {
        let record = HeaderRecord::Column(ColumnRecord {
            label: "FP".to_string(),
            column_type: ColumnType::Amplitude,
            min: 0.5,
            max: 1200.25,
            dataset_id: 1,
        });
        let bytes = record.encode().unwrap();
        assert_eq!(bytes.len(), RECORD_LEN);
        assert!(bytes.starts_with(b"COLUMN FP "));
        assert_eq!(roundtrip(&record), record);
    }

    #[test]
    fn test_column_with_extreme_range_fits_record() {
        let record = HeaderRecord::Column(ColumnRecord {
            label: "a".to_string(),
            column_type: ColumnType::Index,
            min: -f32::MAX,
            max: -2_643_998_500_000_000.0,
            dataset_id: 0,
        });
        let bytes = record.encode().unwrap();
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(roundtrip(&record), record);
        assert_eq!(fmt_float(1200.25), "1200.25");
        assert_eq!(fmt_float(1.0e20), "1e20");
    }

    #[test]
    fn test_colsrc_fixed_columns() {
        let record = HeaderRecord::Colsrc(ColumnSource {
            label: "I(+)".to_string(),
            source: "CREATED_01/02/2024_12:00:00".to_string(),
            dataset_id: Some(2),
        });
        let line = record.to_line().unwrap();
        assert_eq!(&line[7..11], "I(+)");
        assert_eq!(&line[38..65], "CREATED_01/02/2024_12:00:00");
        assert_eq!(roundtrip(&record), record);
    }

    #[test]
    fn test_colgrp_fixed_columns() {
        let record = HeaderRecord::Colgrp(ColumnGroup {
            label: "F(+)".to_string(),
            group_name: "F_anom".to_string(),
            group_type: "Fano".to_string(),
            position: 0x1A,
            dataset_id: 3,
        });
        let line = record.to_line().unwrap();
        assert_eq!(line.len(), RECORD_LEN);
        assert_eq!(&line[74..76], "1A");
        assert_eq!(roundtrip(&record), record);
    }

    #[test]
    fn test_bhch_roundtrip() {
        let record = HeaderRecord::Bhch(vec!["PHI".to_string(), "OMEGA".to_string()]);
        assert_eq!(roundtrip(&record), record);
    }

    #[test]
    fn test_syminf_optional_field_roundtrip() {
        let mut info = SymmetryInfo {
            operator_count: 4,
            primitive_operator_count: 4,
            lattice_type: "P".to_string(),
            space_group_number: 19,
            space_group_name: "P 21 21 21".to_string(),
            point_group: "PG222".to_string(),
            extra: None,
        };
        let six = HeaderRecord::Syminf(info.clone());
        assert_eq!(roundtrip(&six), six);

        info.extra = Some("X".to_string());
        let seven = HeaderRecord::Syminf(info);
        assert_eq!(roundtrip(&seven), seven);
    }

    #[test]
    fn test_encode_rejects_oversized_fields() {
        let record = HeaderRecord::Colsrc(ColumnSource {
            label: "x".repeat(31),
            source: String::new(),
            dataset_id: None,
        });
        assert!(matches!(
            record.encode(),
            Err(FormatError::Unencodable { keyword: Keyword::Colsrc, .. })
        ));

        let record = HeaderRecord::Bhch(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
        assert!(record.encode().is_err());
    }

    #[test]
    fn test_dataset_id() {
        let record = HeaderRecord::Dwavel(DatasetWavelength {
            id: 4,
            wavelength: 0.9795,
        });
        assert_eq!(record.dataset_id(), Some(4));
        assert_eq!(HeaderRecord::End.dataset_id(), None);
    }
}
