//! Datasets and batches.

/// A crystal/experiment grouping that columns belong to.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dataset {
    pub id: i32,
    pub name: Option<String>,
    pub project: Option<String>,
    pub crystal: Option<String>,
    /// Unit cell lengths and angles.
    pub cell: Option<[f32; 6]>,
    pub wavelength: Option<f32>,
}

impl Dataset {
    /// Dataset name, or an empty string when the header has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Scan metadata for one diffraction batch.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Batch {
    pub serial: i32,
    pub title: String,
    /// Integer words following the three length words.
    pub integers: Vec<i32>,
    pub reals: Vec<f32>,
    /// Goniostat axis names.
    pub bhch: Vec<String>,
}
