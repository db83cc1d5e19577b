//! Error types for the Bloom filter crate

use thiserror::Error;

/// Errors that can occur when building or querying a Bloom filter
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Rejected construction input (sizes, probabilities, hash functions)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Statistic that is undefined while no element has been inserted
    #[error("Bloom filter is empty")]
    EmptyFilter,

    /// Configuration text that could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FilterError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Whether this error was raised by argument validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FilterError>;
