//! Fetches quotes into the rate cache and answers rate and conversion queries
//! from the cached snapshot.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::core::cache::RateCache;
use crate::core::error::{RateError, Result};
use crate::core::quotes::QuoteProvider;
use crate::core::rates::{BASE_CURRENCY, DEFAULT_PRECISION, RateSnapshot, pair_key, round_to};
use crate::providers::currencylayer::CurrencyLayerProvider;

/// Outcome of [`RateService::convert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// The converted, rounded amount.
    Amount(f64),
    /// The rate lookup failed or yielded zero, so nothing could be converted.
    NoRate,
}

pub struct RateService {
    api_key: String,
    cache: RateCache,
    provider: Arc<dyn QuoteProvider>,
    precision: u32,
}

impl RateService {
    /// Creates a service talking to the default quote endpoint and caching
    /// on disk at `cache_path`.
    pub fn new<P: AsRef<Path>>(api_key: &str, cache_path: P) -> Result<Self> {
        Self::with_parts(
            api_key,
            RateCache::new(cache_path)?,
            Arc::new(CurrencyLayerProvider::default()),
        )
    }

    pub fn with_parts(
        api_key: &str,
        cache: RateCache,
        provider: Arc<dyn QuoteProvider>,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(RateError::Config("API access key not specified".to_string()));
        }
        Ok(Self {
            api_key: api_key.to_string(),
            cache,
            provider,
            precision: DEFAULT_PRECISION,
        })
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Sets the number of decimal digits kept for rates and amounts.
    pub fn set_precision(&mut self, precision: i64) -> Result<()> {
        self.precision = u32::try_from(precision).map_err(|_| {
            RateError::Config(format!(
                "Precision must be a non-negative integer, got {precision}"
            ))
        })?;
        debug!(precision = self.precision, "Precision updated");
        Ok(())
    }

    /// Builder form of [`RateService::set_precision`].
    pub fn with_precision(mut self, precision: i64) -> Result<Self> {
        self.set_precision(precision)?;
        Ok(self)
    }

    /// Fetches live quotes without touching the cache.
    #[instrument(skip(self))]
    pub async fn fetch_quotes(&self) -> Result<RateSnapshot> {
        self.provider.fetch_quotes(&self.api_key).await
    }

    /// Fetches live quotes and replaces the cached snapshot with them.
    ///
    /// Always goes to the network. On failure the cache is left untouched.
    #[instrument(skip(self))]
    pub async fn fetch_and_store_rates(&self) -> Result<RateSnapshot> {
        let snapshot = self.fetch_quotes().await?;
        self.cache.save(&snapshot).await?;
        info!(
            "Stored {} quotes in {}",
            snapshot.len(),
            self.cache.path().display()
        );
        Ok(snapshot)
    }

    /// Reads the cached snapshot as-is.
    pub async fn cached_rates(&self) -> Result<RateSnapshot> {
        self.cache.get().await
    }

    /// Any failure to read the cache, I/O included, means there is no data
    /// to answer from.
    async fn usable_snapshot(&self) -> Result<RateSnapshot> {
        let snapshot = self
            .cache
            .get()
            .await
            .map_err(|e| RateError::DataUnavailable(e.to_string()))?;
        if snapshot.is_empty() {
            return Err(RateError::DataUnavailable(
                "Cached snapshot holds no quotes".to_string(),
            ));
        }
        Ok(snapshot)
    }

    /// Rate for converting one unit of `from` into `to`, rounded to
    /// `precision` digits (or the service precision).
    ///
    /// Every stored quote is relative to the base currency, so a cross rate
    /// A→B is derived as (base→B) / (base→A). `USD`→`USD` is not special
    /// cased: the snapshot carries no `USDUSD` pair, so it is a format error.
    pub async fn get_rate(&self, from: &str, to: &str, precision: Option<u32>) -> Result<f64> {
        let snapshot = self.usable_snapshot().await?;
        let precision = precision.unwrap_or(self.precision);

        let rate = if from == BASE_CURRENCY {
            lookup(&snapshot, to)?
        } else if to == BASE_CURRENCY {
            let from_rate = lookup(&snapshot, from)?;
            if from_rate == 0.0 {
                return Err(RateError::DataFormat(format!(
                    "Zero rate stored for {}",
                    pair_key(from)
                )));
            }
            1.0 / from_rate
        } else {
            let from_rate = lookup(&snapshot, from)?;
            let to_rate = lookup(&snapshot, to)?;
            if from_rate == 0.0 {
                return Err(RateError::DataFormat(format!(
                    "Zero rate stored for {}",
                    pair_key(from)
                )));
            }
            to_rate / from_rate
        };

        let rounded = round_to(rate, precision);
        debug!(from, to, precision, rate = rounded, "Resolved rate");
        Ok(rounded)
    }

    /// Converts `amount` of `from` into `to`.
    ///
    /// The rate is looked up at the service precision; `precision` only
    /// applies to rounding the converted amount. A failed lookup or a zero
    /// rate gives [`Conversion::NoRate`].
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        precision: Option<u32>,
    ) -> Conversion {
        let rate = match self.get_rate(from, to, None).await {
            Ok(rate) if rate != 0.0 => rate,
            Ok(_) => {
                warn!(from, to, "Rate rounds to zero, cannot convert");
                return Conversion::NoRate;
            }
            Err(e) => {
                warn!(from, to, error = %e, "No rate available for conversion");
                return Conversion::NoRate;
            }
        };
        Conversion::Amount(round_to(amount * rate, precision.unwrap_or(self.precision)))
    }
}

fn lookup(snapshot: &RateSnapshot, currency: &str) -> Result<f64> {
    let key = pair_key(currency);
    snapshot
        .get(&key)
        .copied()
        .ok_or_else(|| RateError::DataFormat(format!("No quote for {key} in cached rates")))
}
