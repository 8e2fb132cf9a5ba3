pub mod currencies;
pub mod fetcher;

#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use currencies::{get_currency_rates, CurrencyRatesClient, CURRENCIES_URL};
pub use fetcher::{HttpFetcher, PayloadFetcher, TransportPolicy};
