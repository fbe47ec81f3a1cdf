//! Header record keywords.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Keyword introducing an 80-byte header record.
///
/// The set is closed: any other keyword is rejected by [`Keyword::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Keyword {
    Vers,
    Title,
    Ncol,
    Cell,
    Sort,
    Syminf,
    Symm,
    Reso,
    Valm,
    Col,
    Column,
    Colsrc,
    Colgrp,
    Ndif,
    Project,
    Crystal,
    Dataset,
    Dcell,
    Dwavel,
    Batch,
    End,
    MtzHist,
    MtzBats,
    MtzEndOfHeaders,
    Bh,
    Bhch,
}

impl Keyword {
    /// Every keyword, in the order records usually appear.
    pub const ALL: [Keyword; 26] = [
        Self::Vers,
        Self::Title,
        Self::Ncol,
        Self::Cell,
        Self::Sort,
        Self::Syminf,
        Self::Symm,
        Self::Reso,
        Self::Valm,
        Self::Col,
        Self::Column,
        Self::Colsrc,
        Self::Colgrp,
        Self::Ndif,
        Self::Project,
        Self::Crystal,
        Self::Dataset,
        Self::Dcell,
        Self::Dwavel,
        Self::Batch,
        Self::End,
        Self::MtzHist,
        Self::MtzBats,
        Self::MtzEndOfHeaders,
        Self::Bh,
        Self::Bhch,
    ];

    /// Keyword as written in the file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vers => "VERS",
            Self::Title => "TITLE",
            Self::Ncol => "NCOL",
            Self::Cell => "CELL",
            Self::Sort => "SORT",
            Self::Syminf => "SYMINF",
            Self::Symm => "SYMM",
            Self::Reso => "RESO",
            Self::Valm => "VALM",
            Self::Col => "COL",
            Self::Column => "COLUMN",
            Self::Colsrc => "COLSRC",
            Self::Colgrp => "COLGRP",
            Self::Ndif => "NDIF",
            Self::Project => "PROJECT",
            Self::Crystal => "CRYSTAL",
            Self::Dataset => "DATASET",
            Self::Dcell => "DCELL",
            Self::Dwavel => "DWAVEL",
            Self::Batch => "BATCH",
            Self::End => "END",
            Self::MtzHist => "MTZHIST",
            Self::MtzBats => "MTZBATS",
            Self::MtzEndOfHeaders => "MTZENDOFHEADERS",
            Self::Bh => "BH",
            Self::Bhch => "BHCH",
        }
    }

    /// Keywords whose records describe a dataset.
    #[must_use]
    pub const fn defines_dataset(self) -> bool {
        matches!(
            self,
            Self::Project | Self::Crystal | Self::Dataset | Self::Dcell | Self::Dwavel
        )
    }

    /// Keywords whose records describe a column.
    #[must_use]
    pub const fn defines_column(self) -> bool {
        matches!(self, Self::Col | Self::Column | Self::Colsrc)
    }
}

impl FromStr for Keyword {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str() == s)
            .ok_or_else(|| FormatError::UnknownKeyword {
                keyword: s.to_string(),
            })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
