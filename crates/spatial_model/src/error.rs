//! Error types for the spatial model crate

use thiserror::Error;

/// Errors raised while reading numeric text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A numeric field could not be read as whole, decimal, fraction or mixed
    #[error("cannot parse '{0}' as a number")]
    FractionParsing(String),

    /// A fraction was built with a zero denominator
    #[error("denominator is zero")]
    ZeroDenominator,

    /// Exact arithmetic left the range of the underlying integers
    #[error("number is too large")]
    NumberTooLarge,
}

impl FormatError {
    /// Key of the user-facing message for this error
    pub fn message_key(&self) -> &'static str {
        match self {
            FormatError::FractionParsing(_) => "fractionParsing",
            FormatError::ZeroDenominator => "denominatorIsZero",
            FormatError::NumberTooLarge => "numberTooLarge",
        }
    }
}

/// Result type for numeric parsing
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for settings persistence
pub type SettingsResult<T> = Result<T, SettingsError>;
