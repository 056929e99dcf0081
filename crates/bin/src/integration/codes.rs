//! Ticker list assembly from the command line and ticker files.

use std::path::Path;
use straits_data::universe::{filter_by_exchange, load_ticker_list};
use straits_data::{Exchange, Result};

/// Merge explicit codes with a ticker file, then keep the chosen exchanges.
///
/// Explicit codes come first. Duplicates keep their first position. An empty
/// exchange list keeps every code.
pub(crate) fn collect_codes(
    explicit: &[String],
    tickers: Option<&Path>,
    exchanges: &[Exchange],
) -> Result<Vec<String>> {
    let mut codes: Vec<String> = Vec::new();

    let from_file = match tickers {
        Some(path) => load_ticker_list(path)?,
        None => Vec::new(),
    };

    for code in explicit.iter().map(|c| c.trim()).chain(from_file.iter().map(String::as_str)) {
        if !code.is_empty() && !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }

    if exchanges.is_empty() {
        return Ok(codes);
    }
    Ok(filter_by_exchange(&codes, exchanges))
}

/// Parse comma-separated country codes into exchanges.
pub(crate) fn parse_exchanges(countries: &[String]) -> Result<Vec<Exchange>> {
    countries.iter().map(|c| c.parse::<Exchange>()).collect()
}
