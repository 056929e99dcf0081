//! ASEAN exchanges and ticker lists.

use crate::error::{DataError, Result};
use crate::record::CompanyInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Exchanges covered by the ticker universe, keyed by Yahoo suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Singapore Exchange
    Singapore,

    /// Bursa Malaysia
    Malaysia,

    /// Indonesia Stock Exchange
    Indonesia,

    /// Stock Exchange of Thailand
    Thailand,

    /// Philippine Stock Exchange
    Philippines,

    /// Ho Chi Minh Stock Exchange
    Vietnam,
}

impl Exchange {
    /// Returns all exchanges.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Singapore,
            Self::Malaysia,
            Self::Indonesia,
            Self::Thailand,
            Self::Philippines,
            Self::Vietnam,
        ]
    }

    /// Two-letter country code.
    pub const fn country_code(&self) -> &'static str {
        match self {
            Self::Singapore => "SG",
            Self::Malaysia => "MY",
            Self::Indonesia => "ID",
            Self::Thailand => "TH",
            Self::Philippines => "PH",
            Self::Vietnam => "VN",
        }
    }

    /// Ticker suffix, including the dot.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Singapore => ".SI",
            Self::Malaysia => ".KL",
            Self::Indonesia => ".JK",
            Self::Thailand => ".BK",
            Self::Philippines => ".PS",
            Self::Vietnam => ".VN",
        }
    }

    /// Full exchange name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Singapore => "Singapore Exchange",
            Self::Malaysia => "Bursa Malaysia",
            Self::Indonesia => "Indonesia Stock Exchange",
            Self::Thailand => "Stock Exchange of Thailand",
            Self::Philippines => "Philippine Stock Exchange",
            Self::Vietnam => "Ho Chi Minh Stock Exchange",
        }
    }

    /// Parse from a two-letter country code, case-insensitively.
    pub fn from_country_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|e| e.country_code().eq_ignore_ascii_case(code))
    }

    /// Exchange a ticker code belongs to, judged by its suffix.
    pub fn from_ticker(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|e| e.lists(code))
    }

    /// Whether `code` carries this exchange's suffix.
    pub fn lists(&self, code: &str) -> bool {
        code.ends_with(self.suffix())
    }

    /// Ticker body with this exchange's suffix removed.
    pub fn strip<'a>(&self, code: &'a str) -> Option<&'a str> {
        code.strip_suffix(self.suffix())
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Exchange {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_country_code(s).ok_or_else(|| DataError::UnknownExchange(s.to_string()))
    }
}

/// Keep the codes listed on any of `exchanges`, preserving order.
pub fn filter_by_exchange(codes: &[String], exchanges: &[Exchange]) -> Vec<String> {
    codes
        .iter()
        .filter(|code| exchanges.iter().any(|e| e.lists(code)))
        .cloned()
        .collect()
}

/// Whether the company's sector contains any of `targets`, ignoring case.
///
/// An empty target list matches everything.
pub fn matches_sector(info: &CompanyInfo, targets: &[String]) -> bool {
    if targets.is_empty() {
        return true;
    }
    let sector = info.text("sector").unwrap_or("Unknown").to_lowercase();
    targets
        .iter()
        .any(|t| sector.contains(&t.trim().to_lowercase()))
}

/// Read ticker codes from the first column of a header-less CSV.
///
/// Codes are trimmed; blank and `nan` entries are dropped and duplicates keep
/// their first position.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_ticker_list(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(code) = row.get(0).map(str::trim) else {
            continue;
        };
        if code.is_empty() || code.eq_ignore_ascii_case("nan") {
            continue;
        }
        if seen.insert(code.to_string()) {
            codes.push(code.to_string());
        }
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_all_exchanges() {
        assert_eq!(Exchange::all().len(), 6);
    }

    #[rstest]
    #[case("D05.SI", Some(Exchange::Singapore))]
    #[case("4863.KL", Some(Exchange::Malaysia))]
    #[case("BBCA.JK", Some(Exchange::Indonesia))]
    #[case("PTT.BK", Some(Exchange::Thailand))]
    #[case("TEL.PS", Some(Exchange::Philippines))]
    #[case("VNM.VN", Some(Exchange::Vietnam))]
    #[case("AAPL", None)]
    fn test_from_ticker(#[case] code: &str, #[case] expected: Option<Exchange>) {
        assert_eq!(Exchange::from_ticker(code), expected);
    }

    #[test]
    fn test_from_country_code() {
        assert_eq!("my".parse::<Exchange>().unwrap(), Exchange::Malaysia);
        assert_eq!(Exchange::from_country_code(" SG "), Some(Exchange::Singapore));
        assert!(matches!(
            "JP".parse::<Exchange>(),
            Err(DataError::UnknownExchange(_))
        ));
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(Exchange::Malaysia.strip("0012.KL"), Some("0012"));
        assert_eq!(Exchange::Malaysia.strip("D05.SI"), None);
    }

    #[test]
    fn test_filter_by_exchange() {
        let codes: Vec<String> = ["D05.SI", "4863.KL", "PTT.BK", "0012.KL"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let filtered = filter_by_exchange(&codes, &[Exchange::Malaysia, Exchange::Thailand]);
        assert_eq!(filtered, vec!["4863.KL", "PTT.BK", "0012.KL"]);
    }

    #[test]
    fn test_matches_sector() {
        let info: CompanyInfo = serde_json::from_value(json!({"sector": "Technology"})).unwrap();
        let unknown = CompanyInfo::default();

        assert!(matches_sector(&info, &["tech".to_string()]));
        assert!(matches_sector(&info, &["Real Estate".to_string(), "TECHNOLOGY".to_string()]));
        assert!(!matches_sector(&info, &["Energy".to_string()]));
        assert!(!matches_sector(&unknown, &["Energy".to_string()]));
        assert!(matches_sector(&unknown, &[]));
    }

    #[test]
    fn test_load_ticker_list() {
        let path = std::env::temp_dir().join("straits-ticker-list.csv");
        std::fs::write(&path, " D05.SI ,DBS\n4863.KL\n\nnan\nD05.SI\n0012.KL,extra,cols\n").unwrap();

        let codes = load_ticker_list(&path).unwrap();
        assert_eq!(codes, vec!["D05.SI", "4863.KL", "0012.KL"]);

        std::fs::remove_file(path).ok();
    }
}
