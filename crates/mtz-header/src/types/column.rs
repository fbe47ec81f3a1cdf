//! Column definitions.

use std::fmt;

/// Physical quantity stored in a column, as its single-letter MTZ code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnType {
    /// `H`: Miller index.
    Index,
    /// `J`: intensity.
    Intensity,
    /// `F`: structure amplitude.
    Amplitude,
    /// `D`: anomalous difference.
    AnomalousDifference,
    /// `Q`: standard deviation of J, F or D.
    StandardDeviation,
    /// `G`: F(+) or F(-).
    FriedelAmplitude,
    /// `L`: standard deviation of G.
    FriedelAmplitudeSigma,
    /// `K`: I(+) or I(-).
    FriedelIntensity,
    /// `M`: standard deviation of K.
    FriedelIntensitySigma,
    /// `E`: normalized amplitude.
    NormalizedAmplitude,
    /// `P`: phase angle in degrees.
    Phase,
    /// `W`: weight.
    Weight,
    /// `A`: Hendrickson-Lattman phase probability coefficient.
    PhaseProbability,
    /// `B`: batch number.
    BatchNumber,
    /// `Y`: M/ISYM packed partial and symmetry flags.
    SymmetryFlag,
    /// `I`: any other integer.
    Integer,
    /// `R`: any other real.
    Real,
}

impl ColumnType {
    pub const ALL: [ColumnType; 17] = [
        Self::Index,
        Self::Intensity,
        Self::Amplitude,
        Self::AnomalousDifference,
        Self::StandardDeviation,
        Self::FriedelAmplitude,
        Self::FriedelAmplitudeSigma,
        Self::FriedelIntensity,
        Self::FriedelIntensitySigma,
        Self::NormalizedAmplitude,
        Self::Phase,
        Self::Weight,
        Self::PhaseProbability,
        Self::BatchNumber,
        Self::SymmetryFlag,
        Self::Integer,
        Self::Real,
    ];

    /// Single-letter code written in `COLUMN` records.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Index => 'H',
            Self::Intensity => 'J',
            Self::Amplitude => 'F',
            Self::AnomalousDifference => 'D',
            Self::StandardDeviation => 'Q',
            Self::FriedelAmplitude => 'G',
            Self::FriedelAmplitudeSigma => 'L',
            Self::FriedelIntensity => 'K',
            Self::FriedelIntensitySigma => 'M',
            Self::NormalizedAmplitude => 'E',
            Self::Phase => 'P',
            Self::Weight => 'W',
            Self::PhaseProbability => 'A',
            Self::BatchNumber => 'B',
            Self::SymmetryFlag => 'Y',
            Self::Integer => 'I',
            Self::Real => 'R',
        }
    }

    /// Parse a type code. Only single upper-case letters are accepted.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        Self::ALL.into_iter().find(|t| t.code() == c)
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Index => "Miller index",
            Self::Intensity => "intensity",
            Self::Amplitude => "structure amplitude",
            Self::AnomalousDifference => "anomalous difference",
            Self::StandardDeviation => "standard deviation",
            Self::FriedelAmplitude => "F(+) or F(-)",
            Self::FriedelAmplitudeSigma => "standard deviation of F(+) or F(-)",
            Self::FriedelIntensity => "I(+) or I(-)",
            Self::FriedelIntensitySigma => "standard deviation of I(+) or I(-)",
            Self::NormalizedAmplitude => "normalized amplitude",
            Self::Phase => "phase angle",
            Self::Weight => "weight",
            Self::PhaseProbability => "phase probability coefficient",
            Self::BatchNumber => "batch number",
            Self::SymmetryFlag => "M/ISYM",
            Self::Integer => "integer",
            Self::Real => "real",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A column of the reflection table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    /// Column label.
    pub name: String,
    /// Column type.
    pub column_type: ColumnType,
    /// Minimum and maximum value.
    pub range: (f32, f32),
    /// Provenance from the matching `COLSRC` record.
    pub source: Option<String>,
    /// Id of the owning dataset.
    pub dataset_id: i32,
}
