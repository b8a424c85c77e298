use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::{RateError, Result};
use crate::core::quotes::QuoteProvider;
use crate::core::rates::RateSnapshot;

pub const DEFAULT_BASE_URL: &str = "http://api.currencylayer.com";

/// Flat timeout for the whole request; failures are never retried.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// CurrencyLayerProvider implementation for QuoteProvider
pub struct CurrencyLayerProvider {
    base_url: String,
    timeout: Duration,
}

impl CurrencyLayerProvider {
    pub fn new(base_url: &str) -> Self {
        CurrencyLayerProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CurrencyLayerProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    success: bool,
    timestamp: Option<i64>,
    source: Option<String>,
    quotes: Option<RateSnapshot>,
    error: Option<LiveError>,
}

#[derive(Debug, Deserialize)]
struct LiveError {
    code: Option<i64>,
    info: Option<String>,
}

#[async_trait]
impl QuoteProvider for CurrencyLayerProvider {
    #[instrument(name = "CurrencyLayerFetch", skip_all, fields(base_url = %self.base_url))]
    async fn fetch_quotes(&self, access_key: &str) -> Result<RateSnapshot> {
        debug!("Requesting live quotes from {}/live", self.base_url);
        let url = Url::parse_with_params(
            &format!("{}/live", self.base_url),
            &[("access_key", access_key)],
        )
        .map_err(|e| RateError::Config(format!("Invalid quote endpoint {}: {e}", self.base_url)))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("fxrates/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| RateError::Config(format!("Failed to build HTTP client: {e}")))?;

        // The request URL carries the access key, keep it out of error text
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| RateError::Network(e.without_url()))?;

        let status = response.status();
        debug!(%status, "Received quote response");
        if status != StatusCode::OK {
            return Err(RateError::ApiResponse(format!("HTTP error: {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::Network(e.without_url()))?;
        if text.trim().is_empty() {
            return Err(RateError::ApiResponse("Empty response body".to_string()));
        }

        let data: LiveResponse = serde_json::from_str(&text)
            .map_err(|e| RateError::ApiResponse(format!("Failed to parse JSON response: {e}")))?;

        if !data.success {
            let detail = match data.error {
                Some(LiveError { code, info }) => format!(
                    "{} (code {})",
                    info.as_deref().unwrap_or("unknown error"),
                    code.map_or("n/a".to_string(), |c| c.to_string())
                ),
                None => "no error details".to_string(),
            };
            return Err(RateError::ApiResponse(format!(
                "Request was not successful: {detail}"
            )));
        }

        let quotes = data
            .quotes
            .filter(|q| !q.is_empty())
            .ok_or_else(|| RateError::ApiResponse("No quotes in response".to_string()))?;

        if let Some(as_of) = data.timestamp.and_then(|ts| Utc.timestamp_opt(ts, 0).single()) {
            debug!(
                source = data.source.as_deref().unwrap_or("?"),
                %as_of,
                "Fetched {} quotes",
                quotes.len()
            );
        }

        Ok(quotes)
    }
}
