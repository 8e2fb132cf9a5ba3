mod config;

use crate::config::{Config, OutputFormat};
use anyhow::{Context, Result};
use currency_rates_core::{CurrencyRatesClient, ExchangeRateSet};
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let policy = config.transport_policy();
    if policy.danger_accept_invalid_certs {
        warn!("TLS certificate verification is disabled (set STRICT_TLS=true to enable)");
    }

    info!("Fetching currency rates from {}", config.rates_url);

    let client = CurrencyRatesClient::with_policy(&policy, config.rates_url.clone())
        .context("Failed to create HTTP client")?;

    let rates = match client.get_rates().await {
        Ok(rates) => rates,
        Err(e) => {
            error!("Rates fetch failed: {}", e);
            return Err(e).context("Failed to get currency rates");
        }
    };

    info!("Got {} currency rates", rates.len());

    match config.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rates).context("Failed to encode rates")?;
            println!("{}", json);
        }
        OutputFormat::Table => print!("{}", render_table(&rates)),
    }

    Ok(())
}

/// One `CODE  rate` line per currency, sorted by code
fn render_table(rates: &ExchangeRateSet) -> String {
    let width = rates.codes().iter().map(|c| c.len()).max().unwrap_or(0);
    rates
        .codes()
        .into_iter()
        .filter_map(|code| rates.get(code).map(|rate| format!("{:<width$}  {}\n", code, rate)))
        .collect()
}
