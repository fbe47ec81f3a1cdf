//! Decoded MTZ header.

use crate::record::{ColumnCounts, ColumnGroup, HeaderRecord, Resolution, SymmetryInfo};

use super::{Batch, Column, Dataset};

/// Decoded header of an MTZ file.
///
/// Records that are fully represented by [`Header::columns`],
/// [`Header::datasets`], [`Header::version`] and [`Header::title`] are removed
/// from [`Header::records`]; everything else is kept in file order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    /// `VERS` text.
    pub version: String,
    /// `TITLE` text.
    pub title: String,
    /// Remaining header records.
    pub records: Vec<HeaderRecord>,
    /// History lines, in file order.
    pub history: Vec<String>,
    /// Batches, in file order.
    pub batches: Vec<Batch>,
    /// Datasets, ordered by id.
    pub datasets: Vec<Dataset>,
    /// Columns, in file order.
    pub columns: Vec<Column>,
}

impl Header {
    /// Declared column, reflection and batch counts.
    #[must_use]
    pub fn counts(&self) -> Option<ColumnCounts> {
        self.records.iter().find_map(|record| match record {
            HeaderRecord::Ncol(counts) => Some(*counts),
            _ => None,
        })
    }

    /// Number of reflections declared by `NCOL`.
    #[must_use]
    pub fn reflection_count(&self) -> Option<i32> {
        self.counts().map(|counts| counts.reflections)
    }

    /// Global unit cell.
    #[must_use]
    pub fn cell(&self) -> Option<[f32; 6]> {
        self.records.iter().find_map(|record| match record {
            HeaderRecord::Cell(cell) => Some(*cell),
            _ => None,
        })
    }

    /// Space group summary.
    #[must_use]
    pub fn symmetry(&self) -> Option<&SymmetryInfo> {
        self.records.iter().find_map(|record| match record {
            HeaderRecord::Syminf(info) => Some(info),
            _ => None,
        })
    }

    /// Symmetry operators as written in `SYMM` records.
    #[must_use]
    pub fn symmetry_operators(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|record| match record {
                HeaderRecord::Symm(op) => Some(op.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Resolution range.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.records.iter().find_map(|record| match record {
            HeaderRecord::Reso(reso) => Some(*reso),
            _ => None,
        })
    }

    /// Sort order of the reflection table (column numbers, 0 for unused).
    #[must_use]
    pub fn sort_order(&self) -> Option<[i32; 5]> {
        self.records.iter().find_map(|record| match record {
            HeaderRecord::Sort(order) => Some(*order),
            _ => None,
        })
    }

    /// Column group records.
    #[must_use]
    pub fn column_groups(&self) -> Vec<&ColumnGroup> {
        self.records
            .iter()
            .filter_map(|record| match record {
                HeaderRecord::Colgrp(group) => Some(group),
                _ => None,
            })
            .collect()
    }

    /// Find a column by label.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Find a dataset by id.
    #[must_use]
    pub fn dataset(&self, id: i32) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.id == id)
    }

    /// Dataset owning a column.
    #[must_use]
    pub fn dataset_of(&self, column: &Column) -> Option<&Dataset> {
        self.dataset(column.dataset_id)
    }

    /// Columns belonging to a dataset, in file order.
    pub fn columns_in_dataset(&self, id: i32) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |column| column.dataset_id == id)
    }

    /// Find a batch by serial number.
    #[must_use]
    pub fn batch(&self, serial: i32) -> Option<&Batch> {
        self.batches.iter().find(|batch| batch.serial == serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    fn sample() -> Header {
        Header {
            version: "MTZ:V1.1".to_string(),
            title: "test".to_string(),
            records: vec![
                HeaderRecord::Ncol(ColumnCounts {
                    columns: 2,
                    reflections: 100,
                    batches: 0,
                }),
                HeaderRecord::Cell([10.0, 20.0, 30.0, 90.0, 90.0, 90.0]),
                HeaderRecord::Symm("X,Y,Z".to_string()),
                HeaderRecord::Symm("-X,-Y,Z".to_string()),
            ],
            datasets: vec![Dataset {
                id: 1,
                name: Some("native".to_string()),
                ..Dataset::default()
            }],
            columns: vec![
                Column {
                    name: "FP".to_string(),
                    column_type: ColumnType::Amplitude,
                    range: (0.0, 10.0),
                    source: None,
                    dataset_id: 1,
                },
                Column {
                    name: "SIGFP".to_string(),
                    column_type: ColumnType::StandardDeviation,
                    range: (0.0, 1.0),
                    source: None,
                    dataset_id: 1,
                },
            ],
            ..Header::default()
        }
    }

    #[test]
    fn test_record_accessors() {
        let header = sample();
        assert_eq!(header.reflection_count(), Some(100));
        assert_eq!(header.cell(), Some([10.0, 20.0, 30.0, 90.0, 90.0, 90.0]));
        assert_eq!(header.symmetry_operators(), vec!["X,Y,Z", "-X,-Y,Z"]);
        assert!(header.symmetry().is_none());
        assert!(header.resolution().is_none());
    }

    #[test]
    fn test_column_lookup() {
        let header = sample();
        let column = header.column("SIGFP").expect("SIGFP");
        assert_eq!(column.column_type, ColumnType::StandardDeviation);
        assert_eq!(header.dataset_of(column).map(Dataset::display_name), Some("native"));
        assert_eq!(header.columns_in_dataset(1).count(), 2);
        assert_eq!(header.columns_in_dataset(2).count(), 0);
        assert!(header.column("FC").is_none());
    }
}
