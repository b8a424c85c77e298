//! Error types for rate retrieval, caching and conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the rate cache, quote providers and the rate service.
#[derive(Debug, Error)]
pub enum RateError {
    /// Missing or invalid constructor or setter argument.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The cache file does not exist.
    #[error("Cache file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The cache was read but holds no usable snapshot.
    #[error("Exchange rate data unavailable: {0}")]
    DataUnavailable(String),

    /// A required currency pair is missing or unusable.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Transport-level failure talking to the quote provider. Built from
    /// errors stripped of their URL, which carries the access key.
    #[error("API connection error: {0}")]
    Network(#[source] reqwest::Error),

    /// The quote provider answered, but not with usable quotes.
    #[error("API response error: {0}")]
    ApiResponse(String),

    /// Filesystem failure other than a missing cache file.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RateError>;
