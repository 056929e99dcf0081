//! Yahoo Finance data providers.

pub mod fx;

pub use fx::{ExchangeRateProvider, FxConfig, RENMINBI_LABEL, fx_pair};
