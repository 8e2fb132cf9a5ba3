//! Currency Rates Core - scrape exchange rates from a remote JavaScript asset.
//!
//! This module provides:
//! - A one-shot HTTP fetcher with an explicit transport policy
//! - Lenient `CODE:rate` extraction into an [`ExchangeRateSet`]
//! - [`get_currency_rates`], the single fetch-and-extract entry point
//!
//! There is no caching, retrying or scheduling; every call does exactly one
//! network round trip.

pub mod clients;
pub mod error;
pub mod extract;
mod types;

pub use clients::{get_currency_rates, CurrencyRatesClient, TransportPolicy};
pub use error::CurrencyError;
pub use extract::{extract_rates, parse_rate};
pub use types::*;
