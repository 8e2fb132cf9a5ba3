//! Rate snapshot types shared by the fetcher, extractor and callers.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::{IntoIter, Iter};
use std::collections::HashMap;

/// Raw response body handed from the fetcher to the extractor
pub type RawPayload = Vec<u8>;

/// Currency code -> rate against the upstream's implicit base currency.
///
/// Every rate held here is finite and strictly positive. Serializes as a
/// plain JSON object (`{"USD": 1.0, "EUR": 0.91}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateSet {
    rates: HashMap<String, f64>,
}

impl ExchangeRateSet {
    /// Rate for a currency code (exact, case-sensitive match)
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, f64> {
        self.rates.iter()
    }

    /// Currency codes in sorted order
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn into_inner(self) -> HashMap<String, f64> {
        self.rates
    }

    /// Insert used by the extractor only; later inserts overwrite earlier ones.
    pub(crate) fn insert(&mut self, code: String, rate: f64) {
        self.rates.insert(code, rate);
    }
}

impl IntoIterator for ExchangeRateSet {
    type Item = (String, f64);
    type IntoIter = IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExchangeRateSet {
    type Item = (&'a String, &'a f64);
    type IntoIter = Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExchangeRateSet {
        let mut rates = ExchangeRateSet::default();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("JPY".to_string(), 149.5);
        rates.insert("EUR".to_string(), 0.91234);
        rates
    }

    #[test]
    fn test_lookup_and_codes() {
        let rates = sample();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.get("EUR"), Some(0.91234));
        assert_eq!(rates.get("eur"), None);
        assert!(rates.contains("JPY"));
        assert_eq!(rates.codes(), vec!["EUR", "JPY", "USD"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["USD"], 1.0);
        assert_eq!(json["JPY"], 149.5);

        let back: ExchangeRateSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_iterate_owned_and_borrowed() {
        let rates = sample();

        let mut borrowed: Vec<(&str, f64)> = (&rates)
            .into_iter()
            .map(|(code, rate)| (code.as_str(), *rate))
            .collect();
        borrowed.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(borrowed, vec![("EUR", 0.91234), ("JPY", 149.5), ("USD", 1.0)]);

        let total: f64 = rates.clone().into_iter().map(|(_, rate)| rate).sum();
        assert!((total - 151.41234).abs() < 1e-9);

        let inner = rates.into_inner();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner.get("USD"), Some(&1.0));
    }
}
