pub mod cli;
pub mod core;
pub mod providers;
pub mod service;
pub mod store;

use crate::cli::{rates, ui};
use crate::core::RateCache;
use crate::core::config::AppConfig;
use crate::providers::CurrencyLayerProvider;
use crate::service::RateService;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands that operate on the configured rate service.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Fetch live quotes and replace the cache.
    Refresh,
    Rate {
        from: String,
        to: String,
        precision: Option<u32>,
    },
    Convert {
        amount: f64,
        from: String,
        to: String,
        precision: Option<u32>,
    },
    /// Show the cached snapshot.
    List,
    /// Delete the cache file.
    Clear,
}

/// Builds a rate service from the settings in `config`.
pub fn build_service(config: &AppConfig) -> Result<RateService> {
    let cache_path = config.cache_path()?;
    debug!("Using rate cache at {}", cache_path.display());

    let cache = RateCache::new(&cache_path)?;
    let provider = Arc::new(CurrencyLayerProvider::new(&config.provider.base_url));
    let service = RateService::with_parts(&config.api_key, cache, provider)
        .context("Invalid configuration")?;
    let service = match config.precision {
        Some(precision) => service
            .with_precision(precision)
            .context("Invalid precision in configuration")?,
        None => service,
    };
    Ok(service)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxrates starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        cache_path = ?config.cache_path,
        precision = ?config.precision,
        base_url = %config.provider.base_url,
        "Loaded config"
    );

    let service = build_service(&config)?;

    match command {
        AppCommand::Refresh => {
            let spinner = ui::new_spinner("Fetching live quotes...");
            let result = service.fetch_and_store_rates().await;
            spinner.finish_and_clear();
            let snapshot = result.context("Failed to refresh exchange rates")?;
            println!("{}", rates::display_refresh(&snapshot, service.cache().path()));
        }
        AppCommand::Rate {
            from,
            to,
            precision,
        } => {
            let rate = service
                .get_rate(&from, &to, precision)
                .await
                .with_context(|| format!("Failed to get rate {from} -> {to}"))?;
            println!("{}", rates::display_rate(&from, &to, rate));
        }
        AppCommand::Convert {
            amount,
            from,
            to,
            precision,
        } => {
            let conversion = service.convert(amount, &from, &to, precision).await;
            println!(
                "{}",
                rates::display_conversion(amount, &from, &to, conversion)
            );
        }
        AppCommand::List => {
            let snapshot = service
                .cached_rates()
                .await
                .context("No cached rates, run `fxrates refresh` first")?;
            println!("{}", rates::display_snapshot(&snapshot));
        }
        AppCommand::Clear => {
            service
                .cache()
                .clear()
                .await
                .context("Failed to clear rate cache")?;
            println!("Cleared {}", service.cache().path().display());
        }
    }

    Ok(())
}
