//! Error types for the layout engines

use spatial_model::FormatError;
use thiserror::Error;

/// Number line input that cannot be laid out
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberLineError {
    #[error("Interval cannot be zero")]
    IntervalIsZero,

    #[error("Interval cannot be negative")]
    IntervalIsNegative,

    #[error("Denominator cannot be zero")]
    DenominatorIsZero,

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Segment start and end must both be filled or both be empty")]
    UnpairedSegment,

    #[error("Values are out of order: {0}")]
    OutOfOrder(&'static str),

    #[error("{0} does not fall on an interval")]
    IntervalMisalignment(&'static str),

    #[error("Line has {0} intervals, more than a page can draw")]
    TooManyIntervals(usize),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl NumberLineError {
    /// Key of the user-facing message for this error
    pub fn message_key(&self) -> &'static str {
        match self {
            NumberLineError::IntervalIsZero => "intervalIsZero",
            NumberLineError::IntervalIsNegative => "intervalIsNegative",
            NumberLineError::DenominatorIsZero => "denominatorIsZero",
            NumberLineError::EmptyField(_) => "emptyField",
            NumberLineError::UnpairedSegment => "unpairedSegment",
            NumberLineError::OutOfOrder(_) => "outOfOrder",
            NumberLineError::IntervalMisalignment(_) => "intervalMisalignment",
            NumberLineError::TooManyIntervals(_) => "tooManyIntervals",
            NumberLineError::Format(e) => e.message_key(),
        }
    }
}

/// A rendered layout does not fit the page
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Line is {width} cells wide but the page holds {limit}")]
    LineTooLong { width: usize, limit: usize },

    #[error("Indented matrix line is {width} cells wide but the page holds {limit}")]
    IndentTooWide { width: usize, limit: usize },
}

/// Errors reading or writing persisted containers
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported record version {0}")]
    UnsupportedVersion(u64),

    #[error("Invalid legacy record: {0}")]
    InvalidLegacy(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Any failure of a format pass
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialError {
    #[error(transparent)]
    NumberLine(#[from] NumberLineError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, SpatialError>;

pub type PersistResult<T> = std::result::Result<T, PersistError>;
