//! Rate extraction from the upstream JavaScript asset
//!
//! The asset is not structured data; rates are scraped as `CODE:rate`
//! tokens (e.g. `USD:1.15998`, `JPY:.808357`) wherever they appear.

use crate::error::{CurrencyError, Result};
use crate::types::ExchangeRateSet;
use regex::bytes::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Group 1 = currency code, group 2 = rate
const RATE_PATTERN: &str = r"([0-9A-Za-z_]+):([0-9]*\.?[0-9]+)";

fn rate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(RATE_PATTERN).expect("RATE_PATTERN is a valid regex"))
}

/// Extract every `CODE:rate` pair from a raw payload.
///
/// Fails with `NoDataFound` only when the pattern never matches. Zero and
/// unparseable rates are skipped, so an empty set is a valid result.
/// Duplicate codes keep the last occurrence.
pub fn extract_rates(payload: &[u8]) -> Result<ExchangeRateSet> {
    let mut rates = ExchangeRateSet::default();
    let mut matched = 0usize;

    for caps in rate_pattern().captures_iter(payload) {
        matched += 1;

        // Both groups are ASCII-only by construction
        let (Some(code), Some(rate)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let code = String::from_utf8_lossy(code.as_bytes());
        let rate = parse_rate(&String::from_utf8_lossy(rate.as_bytes()));

        if rate == 0.0 {
            trace!("Skipping {} with zero or invalid rate", code);
            continue;
        }

        rates.insert(code.into_owned(), rate);
    }

    if matched == 0 {
        return Err(CurrencyError::NoDataFound);
    }

    debug!(
        "Extracted {} rates from {} matches ({} bytes)",
        rates.len(),
        matched,
        payload.len()
    );

    Ok(rates)
}

/// Parse a rate token, returning 0.0 for anything that is not a finite
/// decimal number.
///
/// A bare leading point gets a zero prepended (".808357" -> 0.808357).
pub fn parse_rate(token: &str) -> f64 {
    let parsed = if token.starts_with('.') {
        format!("0{}", token).parse::<f64>()
    } else {
        token.parse::<f64>()
    };

    match parsed {
        Ok(rate) if rate.is_finite() => rate,
        _ => 0.0,
    }
}
