//! Bursa Malaysia board classification.
//!
//! Bursa codes carry their board in the digits: LEAP Market stocks are five
//! digits starting `03`, ACE Market stocks four digits starting `0`, and Main
//! Market stocks four digits starting `1`-`9`. Codes on other exchanges keep
//! the provider's exchange label.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use straits_data::Exchange;

/// Market segment a security trades on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MarketTier {
    /// Bursa LEAP Market
    #[display("LEAP")]
    Leap,
    /// Bursa ACE Market
    #[display("ACE")]
    Ace,
    /// Bursa Main Market
    #[display("Main")]
    Main,
    /// Bursa code outside the known digit patterns
    #[display("Main/Other")]
    MainOther,
    /// Exchange label passed through from the provider
    #[display("{_0}")]
    Exchange(String),
}

impl From<MarketTier> for String {
    fn from(tier: MarketTier) -> Self {
        tier.to_string()
    }
}

impl From<String> for MarketTier {
    fn from(label: String) -> Self {
        match label.as_str() {
            "LEAP" => Self::Leap,
            "ACE" => Self::Ace,
            "Main" => Self::Main,
            "Main/Other" => Self::MainOther,
            _ => Self::Exchange(label),
        }
    }
}

/// Classify `code`, falling back to `provider_tier` off Bursa Malaysia.
pub fn classify(code: &str, provider_tier: &str) -> MarketTier {
    match Exchange::Malaysia.strip(code) {
        Some(body) => classify_bursa_body(body),
        None => MarketTier::Exchange(provider_tier.to_string()),
    }
}

/// Classify a Bursa code with its `.KL` suffix already removed.
pub fn classify_bursa_body(body: &str) -> MarketTier {
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return MarketTier::MainOther;
    }

    match body.as_bytes() {
        [b'0', b'3', _, _, _] => MarketTier::Leap,
        [b'0', _, _, _] => MarketTier::Ace,
        [_, _, _, _] => MarketTier::Main,
        _ => MarketTier::MainOther,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0012.KL", MarketTier::Ace)]
    #[case("4863.KL", MarketTier::Main)]
    #[case("1155.KL", MarketTier::Main)]
    #[case("03011.KL", MarketTier::Leap)]
    #[case("04011.KL", MarketTier::MainOther)]
    #[case("5347.KL", MarketTier::Main)]
    #[case("WXYZ.KL", MarketTier::MainOther)]
    #[case("012A.KL", MarketTier::MainOther)]
    #[case("12345.KL", MarketTier::MainOther)]
    #[case(".KL", MarketTier::MainOther)]
    #[case("٠١٢٣.KL", MarketTier::MainOther)]
    fn test_bursa_codes(#[case] code: &str, #[case] expected: MarketTier) {
        assert_eq!(classify(code, "KLS"), expected);
    }

    #[test]
    fn test_other_exchanges_pass_through() {
        assert_eq!(
            classify("D05.SI", "Singapore"),
            MarketTier::Exchange("Singapore".to_string())
        );
        assert_eq!(
            classify("PTT.BK", "Unknown"),
            MarketTier::Exchange("Unknown".to_string())
        );
        // Suffix match is case-sensitive.
        assert_eq!(
            classify("0012.kl", "KLS"),
            MarketTier::Exchange("KLS".to_string())
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(MarketTier::Leap.to_string(), "LEAP");
        assert_eq!(MarketTier::Ace.to_string(), "ACE");
        assert_eq!(MarketTier::Main.to_string(), "Main");
        assert_eq!(MarketTier::MainOther.to_string(), "Main/Other");
        assert_eq!(MarketTier::Exchange("SES".into()).to_string(), "SES");
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&MarketTier::MainOther).unwrap();
        assert_eq!(json, r#""Main/Other""#);

        let tier: MarketTier = serde_json::from_str(r#""SES""#).unwrap();
        assert_eq!(tier, MarketTier::Exchange("SES".to_string()));
        let tier: MarketTier = serde_json::from_str(r#""ACE""#).unwrap();
        assert_eq!(tier, MarketTier::Ace);
    }
}
