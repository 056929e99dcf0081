//! Exchange rates from Yahoo Finance currency pairs.

use crate::error::{DataError, Result};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Display label used for Chinese renminbi in place of `CNY`.
pub const RENMINBI_LABEL: &str = "RMB (CNY)";

/// Configuration for exchange rate lookups.
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Quote currency rates are expressed in.
    pub base: String,
    /// Pause before each Yahoo request.
    pub rate_limit_delay: Duration,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            base: "SGD".to_string(),
            rate_limit_delay: Duration::from_millis(500),
        }
    }
}

/// Yahoo pair symbol for converting `currency` into `base`.
///
/// Returns `None` for blank or `N/A` currencies. The renminbi display label
/// maps back to its ISO code.
pub fn fx_pair(currency: &str, base: &str) -> Option<String> {
    let currency = currency.trim();
    if currency.is_empty() || currency == "N/A" {
        return None;
    }
    let code = if currency == RENMINBI_LABEL {
        "CNY"
    } else {
        currency
    };
    Some(format!("{code}{base}=X"))
}

/// Previous-close exchange rates, cached per currency for one run.
pub struct ExchangeRateProvider {
    provider: yahoo::YahooConnector,
    config: FxConfig,
    cache: HashMap<String, Option<f64>>,
}

impl std::fmt::Debug for ExchangeRateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateProvider")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl ExchangeRateProvider {
    /// Create a provider quoting rates in `config.base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Yahoo connector cannot be built.
    pub fn new(config: FxConfig) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            config,
            cache: HashMap::new(),
        })
    }

    /// Rate converting one unit of `currency` into the base currency.
    ///
    /// Lookup failures are logged and yield `None`; they never abort a run.
    pub async fn rate_for(&mut self, currency: &str) -> Option<f64> {
        if currency == self.config.base {
            return Some(1.0);
        }
        if let Some(cached) = self.cache.get(currency) {
            return *cached;
        }

        let rate = match fx_pair(currency, &self.config.base) {
            Some(pair) => match self.fetch_close(&pair).await {
                Ok(rate) => Some(rate),
                Err(e) => {
                    tracing::warn!(%pair, error = %e, "exchange rate unavailable");
                    None
                }
            },
            None => None,
        };

        self.cache.insert(currency.to_string(), rate);
        rate
    }

    async fn fetch_close(&self, pair: &str) -> Result<f64> {
        sleep(self.config.rate_limit_delay).await;

        let response = self.provider.get_latest_quotes(pair, "1d").await?;
        let quote = response.last_quote()?;

        if !quote.close.is_finite() || quote.close <= 0.0 {
            return Err(DataError::MissingData {
                symbol: pair.to_string(),
                reason: format!("unusable close {}", quote.close),
            });
        }

        tracing::debug!(%pair, rate = quote.close, "exchange rate");
        Ok(quote.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MYR", Some("MYRSGD=X"))]
    #[case("RMB (CNY)", Some("CNYSGD=X"))]
    #[case(" IDR ", Some("IDRSGD=X"))]
    #[case("N/A", None)]
    #[case("", None)]
    fn test_fx_pair(#[case] currency: &str, #[case] expected: Option<&str>) {
        assert_eq!(fx_pair(currency, "SGD").as_deref(), expected);
    }

    #[tokio::test]
    async fn test_base_currency_is_unity() {
        let mut provider = ExchangeRateProvider::new(FxConfig::default()).unwrap();
        assert_eq!(provider.rate_for("SGD").await, Some(1.0));
    }

    #[tokio::test]
    async fn test_unknown_currency_is_cached_as_missing() {
        let mut provider = ExchangeRateProvider::new(FxConfig::default()).unwrap();
        assert_eq!(provider.rate_for("N/A").await, None);
        assert_eq!(provider.cache.get("N/A"), Some(&None));
    }
}
