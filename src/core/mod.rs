//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod error;
pub mod log;
pub mod quotes;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use error::{RateError, Result};
pub use quotes::QuoteProvider;
pub use rates::{BASE_CURRENCY, DEFAULT_PRECISION, RateSnapshot};
