//! Typed payloads carried by header records.

use crate::types::ColumnType;

/// `NCOL`: declared column, reflection and batch counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnCounts {
    pub columns: i32,
    pub reflections: i32,
    pub batches: i32,
}

/// `RESO`: resolution limits as 1/d² (low, high).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Resolution {
    pub min: f32,
    pub max: f32,
}

impl Resolution {
    /// Low resolution limit in Ångström.
    #[must_use]
    pub fn low_limit(&self) -> f32 {
        1.0 / self.min.sqrt()
    }

    /// High resolution limit in Ångström.
    #[must_use]
    pub fn high_limit(&self) -> f32 {
        1.0 / self.max.sqrt()
    }
}

/// `SYMINF`: space group summary.
///
/// Files written by some programs carry a seventh field whose meaning is not
/// documented; it is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymmetryInfo {
    pub operator_count: i32,
    pub primitive_operator_count: i32,
    pub lattice_type: String,
    pub space_group_number: i32,
    pub space_group_name: String,
    pub point_group: String,
    pub extra: Option<String>,
}

/// `COL` / `COLUMN`: column label, type, range and dataset id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnRecord {
    pub label: String,
    pub column_type: ColumnType,
    pub min: f32,
    pub max: f32,
    pub dataset_id: i32,
}

/// `COLSRC`: provenance of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnSource {
    pub label: String,
    pub source: String,
    pub dataset_id: Option<i32>,
}

/// `COLGRP`: column group membership.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnGroup {
    pub label: String,
    pub group_name: String,
    pub group_type: String,
    /// Position within the group, written in hexadecimal.
    pub position: u32,
    pub dataset_id: i32,
}

/// `PROJECT`, `CRYSTAL`, `DATASET`: a name attached to a dataset id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetName {
    pub id: i32,
    pub name: String,
}

/// `DCELL`: unit cell of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetCell {
    pub id: i32,
    pub cell: [f32; 6],
}

/// `DWAVEL`: wavelength of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetWavelength {
    pub id: i32,
    pub wavelength: f32,
}

/// `BH`: batch framing (serial and the lengths of its binary arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchHeader {
    pub serial: i32,
    pub nwords: i32,
    pub nintegers: i32,
    pub nreals: i32,
}
