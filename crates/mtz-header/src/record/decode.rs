//! Record keyword dispatch.

use crate::error::FormatError;
use crate::types::ColumnType;

use super::fields::{
    expect_arity, parse_count, parse_float, parse_floats, parse_hex, parse_int, read_slice,
    split_exact, tokenize,
};
use super::{
    BHCH_FIELD_LEN, BatchHeader, ColumnCounts, ColumnGroup, ColumnRecord, ColumnSource,
    DatasetCell, DatasetName, DatasetWavelength, HeaderRecord, Keyword, Resolution,
    SymmetryInfo,
};

/// Decode one header record.
///
/// Trailing padding (spaces and NULs) is ignored. The keyword is everything
/// before the first space; the remainder is interpreted according to it.
pub fn decode_record(raw: &[u8]) -> Result<HeaderRecord, FormatError> {
    let end = raw
        .iter()
        .rposition(|b| !b.is_ascii_whitespace() && *b != 0)
        .map_or(0, |last| last + 1);
    let line = &raw[..end];
    let (keyword, columns) = match line.iter().position(|b| *b == b' ') {
        Some(space) => (&line[..space], &line[space + 1..]),
        None => (line, &line[end..]),
    };
    let keyword: Keyword = String::from_utf8_lossy(keyword).parse()?;
    // Fixed-column layouts index `columns` by byte; the rest use text.
    let text = String::from_utf8_lossy(columns);
    let rest = text.as_ref();

    let record = match keyword {
        Keyword::Vers => HeaderRecord::Vers(rest.trim().to_string()),
        Keyword::Title => HeaderRecord::Title(rest.trim().to_string()),
        Keyword::Symm => HeaderRecord::Symm(rest.trim().to_string()),
        Keyword::Valm => HeaderRecord::Valm(rest.trim().to_string()),
        Keyword::Ncol => {
            let fields = split_exact(keyword, rest, 3, "3")?;
            HeaderRecord::Ncol(ColumnCounts {
                columns: parse_int(keyword, fields[0])?,
                reflections: parse_int(keyword, fields[1])?,
                batches: parse_int(keyword, fields[2])?,
            })
        }
        Keyword::Cell => {
            let fields = split_exact(keyword, rest, 6, "6")?;
            HeaderRecord::Cell(parse_floats(keyword, &fields)?)
        }
        Keyword::Sort => {
            let fields = split_exact(keyword, rest, 5, "5")?;
            let mut order = [0i32; 5];
            for (slot, field) in order.iter_mut().zip(&fields) {
                *slot = parse_int(keyword, field)?;
            }
            HeaderRecord::Sort(order)
        }
        Keyword::Reso => {
            let fields = split_exact(keyword, rest, 2, "2")?;
            HeaderRecord::Reso(Resolution {
                min: parse_float(keyword, fields[0])?,
                max: parse_float(keyword, fields[1])?,
            })
        }
        Keyword::Ndif => {
            let fields = split_exact(keyword, rest, 1, "1")?;
            HeaderRecord::Ndif(parse_int(keyword, fields[0])?)
        }
        Keyword::Batch => {
            let serials = rest
                .split_whitespace()
                .map(|field| parse_int(keyword, field))
                .collect::<Result<Vec<_>, _>>()?;
            HeaderRecord::Batch(serials)
        }
        Keyword::Syminf => HeaderRecord::Syminf(decode_syminf(keyword, rest)?),
        Keyword::Col => HeaderRecord::Col(decode_column(keyword, rest)?),
        Keyword::Column => HeaderRecord::Column(decode_column(keyword, rest)?),
        Keyword::Project => HeaderRecord::Project(decode_dataset_name(keyword, rest)?),
        Keyword::Crystal => HeaderRecord::Crystal(decode_dataset_name(keyword, rest)?),
        Keyword::Dataset => HeaderRecord::Dataset(decode_dataset_name(keyword, rest)?),
        Keyword::Dcell => {
            let tokens = tokenize(keyword, rest)?;
            expect_arity(keyword, &tokens, 7, "7")?;
            let fields: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();
            HeaderRecord::Dcell(DatasetCell {
                id: parse_int(keyword, &tokens[0])?,
                cell: parse_floats(keyword, &fields)?,
            })
        }
        Keyword::Dwavel => {
            let tokens = tokenize(keyword, rest)?;
            expect_arity(keyword, &tokens, 2, "2")?;
            HeaderRecord::Dwavel(DatasetWavelength {
                id: parse_int(keyword, &tokens[0])?,
                wavelength: parse_float(keyword, &tokens[1])?,
            })
        }
        Keyword::Colsrc => {
            // Source text may contain spaces, so fields are fixed columns.
            let dataset = read_slice(columns, 67, None);
            HeaderRecord::Colsrc(ColumnSource {
                label: read_slice(columns, 0, Some(30)),
                source: read_slice(columns, 31, Some(67)),
                dataset_id: if dataset.is_empty() {
                    None
                } else {
                    Some(parse_int(keyword, &dataset)?)
                },
            })
        }
        Keyword::Colgrp => HeaderRecord::Colgrp(ColumnGroup {
            label: read_slice(columns, 0, Some(31)),
            group_name: read_slice(columns, 31, Some(62)),
            group_type: read_slice(columns, 62, Some(67)),
            position: parse_hex(keyword, &read_slice(columns, 67, Some(69)))?,
            dataset_id: parse_int(keyword, &read_slice(columns, 69, None))?,
        }),
        Keyword::End => HeaderRecord::End,
        Keyword::MtzBats => HeaderRecord::MtzBats,
        Keyword::MtzEndOfHeaders => HeaderRecord::MtzEndOfHeaders,
        Keyword::MtzHist => {
            let fields = split_exact(keyword, rest, 1, "1")?;
            HeaderRecord::MtzHist(parse_count(keyword, fields[0])?)
        }
        Keyword::Bh => {
            let fields = split_exact(keyword, rest, 4, "4")?;
            HeaderRecord::Bh(BatchHeader {
                serial: parse_int(keyword, fields[0])?,
                nwords: parse_int(keyword, fields[1])?,
                nintegers: parse_int(keyword, fields[2])?,
                nreals: parse_int(keyword, fields[3])?,
            })
        }
        Keyword::Bhch => {
            let names = (0..3)
                .map(|i| {
                    let start = i * BHCH_FIELD_LEN;
                    read_slice(columns, start, Some(start + BHCH_FIELD_LEN))
                })
                .filter(|name| !name.is_empty())
                .collect();
            HeaderRecord::Bhch(names)
        }
    };
    Ok(record)
}

fn decode_column(keyword: Keyword, rest: &str) -> Result<ColumnRecord, FormatError> {
    let tokens = tokenize(keyword, rest)?;
    expect_arity(keyword, &tokens, 5, "5")?;
    let column_type = ColumnType::from_code(&tokens[1])
        .ok_or_else(|| FormatError::invalid_field(keyword, tokens[1].as_str(), "column type"))?;
    Ok(ColumnRecord {
        label: tokens[0].clone(),
        column_type,
        min: parse_float(keyword, &tokens[2])?,
        max: parse_float(keyword, &tokens[3])?,
        dataset_id: parse_int(keyword, &tokens[4])?,
    })
}

fn decode_dataset_name(keyword: Keyword, rest: &str) -> Result<DatasetName, FormatError> {
    let tokens = tokenize(keyword, rest)?;
    expect_arity(keyword, &tokens, 2, "2")?;
    Ok(DatasetName {
        id: parse_int(keyword, &tokens[0])?,
        name: tokens[1].clone(),
    })
}

fn decode_syminf(keyword: Keyword, rest: &str) -> Result<SymmetryInfo, FormatError> {
    let mut tokens = tokenize(keyword, rest)?.into_iter();
    let count = tokens.len();
    if !(6..=7).contains(&count) {
        return Err(FormatError::FieldCount {
            keyword,
            expected: "6 or 7",
            found: count,
        });
    }
    let mut next = || tokens.next().unwrap_or_default();
    Ok(SymmetryInfo {
        operator_count: parse_int(keyword, &next())?,
        primitive_operator_count: parse_int(keyword, &next())?,
        lattice_type: next(),
        space_group_number: parse_int(keyword, &next())?,
        space_group_name: next(),
        point_group: next(),
        extra: (count == 7).then(next),
    })
}
