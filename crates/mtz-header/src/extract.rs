//! Dataset and column reconstruction.
//!
//! Datasets and columns are spread over several record kinds joined on the
//! dataset id (datasets) or the column label (column sources).

use std::collections::BTreeSet;

use crate::error::InconsistencyError;
use crate::record::{HeaderRecord, Keyword};
use crate::types::{Column, Dataset};

type Result<T> = std::result::Result<T, InconsistencyError>;

/// Require exactly one matching item.
pub(crate) fn expect_one<T>(
    items: impl IntoIterator<Item = T>,
    keyword: Keyword,
    context: impl Into<String>,
) -> Result<T> {
    let mut items: Vec<T> = items.into_iter().collect();
    match items.len() {
        1 => Ok(items.remove(0)),
        found => Err(InconsistencyError::Cardinality {
            keyword,
            context: context.into(),
            expected: "exactly one",
            found,
        }),
    }
}

/// Allow zero or one matching item.
pub(crate) fn expect_at_most_one<T>(
    items: impl IntoIterator<Item = T>,
    keyword: Keyword,
    context: impl Into<String>,
) -> Result<Option<T>> {
    let mut items: Vec<T> = items.into_iter().collect();
    match items.len() {
        0 | 1 => Ok(items.pop()),
        found => Err(InconsistencyError::Cardinality {
            keyword,
            context: context.into(),
            expected: "at most one",
            found,
        }),
    }
}

/// Dataset ids referenced by columns and dataset records, in ascending order.
pub(crate) fn dataset_ids(records: &[HeaderRecord]) -> BTreeSet<i32> {
    records
        .iter()
        .filter_map(|record| {
            record
                .as_column()
                .map(|column| column.dataset_id)
                .or_else(|| record.dataset_id())
        })
        .collect()
}

/// Build one dataset per distinct id, checking the id count against `NDIF`.
pub(crate) fn extract_datasets(records: &[HeaderRecord], declared: i32) -> Result<Vec<Dataset>> {
    let ids = dataset_ids(records);
    if usize::try_from(declared).ok() != Some(ids.len()) {
        return Err(InconsistencyError::DatasetCount {
            declared,
            found: ids.into_iter().collect(),
        });
    }

    ids.into_iter()
        .map(|id| {
            let context = format!("dataset {id}");
            let named = |keyword: Keyword| {
                expect_at_most_one(
                    records.iter().filter_map(|record| match record {
                        HeaderRecord::Project(entry)
                        | HeaderRecord::Crystal(entry)
                        | HeaderRecord::Dataset(entry)
                            if record.keyword() == keyword && entry.id == id =>
                        {
                            Some(entry.name.clone())
                        }
                        _ => None,
                    }),
                    keyword,
                    context.as_str(),
                )
            };
            let cell = expect_at_most_one(
                records.iter().filter_map(|record| match record {
                    HeaderRecord::Dcell(cell) if cell.id == id => Some(cell.cell),
                    _ => None,
                }),
                Keyword::Dcell,
                context.as_str(),
            )?;
            let wavelength = expect_at_most_one(
                records.iter().filter_map(|record| match record {
                    HeaderRecord::Dwavel(wavelength) if wavelength.id == id => {
                        Some(wavelength.wavelength)
                    }
                    _ => None,
                }),
                Keyword::Dwavel,
                context.as_str(),
            )?;
            Ok(Dataset {
                id,
                name: named(Keyword::Dataset)?,
                project: named(Keyword::Project)?,
                crystal: named(Keyword::Crystal)?,
                cell,
                wavelength,
            })
        })
        .collect()
}

/// Build columns in header order, attaching sources and resolving datasets.
pub(crate) fn extract_columns(
    records: &[HeaderRecord],
    datasets: &[Dataset],
) -> Result<Vec<Column>> {
    records
        .iter()
        .filter_map(HeaderRecord::as_column)
        .map(|column| {
            let context = format!("column {}", column.label);
            let source = expect_at_most_one(
                records.iter().filter_map(|record| match record {
                    HeaderRecord::Colsrc(source) if source.label == column.label => {
                        Some(source.source.clone())
                    }
                    _ => None,
                }),
                Keyword::Colsrc,
                context.as_str(),
            )?;
            let dataset = datasets
                .iter()
                .filter(|dataset| dataset.id == column.dataset_id);
            expect_one(dataset, Keyword::Dataset, context.as_str()).map_err(|_| {
                InconsistencyError::UnresolvedDataset {
                    column: column.label.clone(),
                    dataset_id: column.dataset_id,
                }
            })?;
            Ok(Column {
                name: column.label.clone(),
                column_type: column.column_type,
                range: (column.min, column.max),
                source,
                dataset_id: column.dataset_id,
            })
        })
        .collect()
}

/// True for records whose content now lives in a structured field of `Header`.
pub(crate) fn is_extracted(keyword: Keyword) -> bool {
    keyword.defines_dataset()
        || keyword.defines_column()
        || matches!(keyword, Keyword::Vers | Keyword::Title | Keyword::Batch)
}
