//! Quote provider abstraction

use crate::core::error::Result;
use crate::core::rates::RateSnapshot;
use async_trait::async_trait;

/// Source of live quotes relative to [`crate::core::rates::BASE_CURRENCY`].
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self, access_key: &str) -> Result<RateSnapshot>;
}
