//! Currency rates client
//!
//! Composes a [`PayloadFetcher`] with the rate extractor. Each call is one
//! fetch followed by one extraction; nothing is cached between calls.

use super::fetcher::{HttpFetcher, PayloadFetcher, TransportPolicy};
use crate::error::Result;
use crate::extract::extract_rates;
use crate::types::ExchangeRateSet;
use tracing::debug;

/// JavaScript asset with the embedded `CODE:rate` table
pub const CURRENCIES_URL: &str = "https://cdn.shopify.com/s/javascripts/currencies.js";

pub struct CurrencyRatesClient<F = HttpFetcher> {
    fetcher: F,
    url: String,
}

impl CurrencyRatesClient<HttpFetcher> {
    /// Client for the production asset with the default transport policy
    pub fn new() -> Result<Self> {
        Self::with_policy(&TransportPolicy::default(), CURRENCIES_URL)
    }

    /// Client with an explicit transport policy and source URL
    pub fn with_policy(policy: &TransportPolicy, url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new(policy)?, url))
    }
}

impl<F: PayloadFetcher> CurrencyRatesClient<F> {
    pub fn with_fetcher(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the asset and extract the current rates.
    ///
    /// Fetch errors are returned as-is and skip extraction entirely.
    pub async fn get_rates(&self) -> Result<ExchangeRateSet> {
        let payload = self.fetcher.fetch(&self.url).await?;
        let rates = extract_rates(&payload)?;
        debug!("Got {} currency rates from {}", rates.len(), self.url);
        Ok(rates)
    }
}

/// Current exchange rates from the production asset, default transport policy
pub async fn get_currency_rates() -> Result<ExchangeRateSet> {
    CurrencyRatesClient::new()?.get_rates().await
}
