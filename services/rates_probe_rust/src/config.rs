//! Environment configuration for the rates probe

use currency_rates_core::clients::CURRENCIES_URL;
use currency_rates_core::TransportPolicy;
use std::env;
use std::time::Duration;

/// How the fetched rates are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "table" | "text" => Some(Self::Table),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub rates_url: String,
    /// Verify upstream certificates instead of accepting anything
    pub strict_tls: bool,
    pub request_timeout: Option<Duration>,
    pub output: OutputFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            rates_url: lookup("CURRENCY_RATES_URL").unwrap_or_else(|| CURRENCIES_URL.to_string()),
            strict_tls: lookup("STRICT_TLS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            output: lookup("RATES_OUTPUT")
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(OutputFormat::Table),
        }
    }

    pub fn transport_policy(&self) -> TransportPolicy {
        let policy = if self.strict_tls {
            TransportPolicy::strict()
        } else {
            TransportPolicy::default()
        };

        match self.request_timeout {
            Some(timeout) => policy.with_request_timeout(timeout),
            None => policy,
        }
    }
}
