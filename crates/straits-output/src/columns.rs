//! Export column labels and monetary scaling.

use crate::export::ExportError;
use std::fmt;
use std::str::FromStr;

/// Row number, starting at 1.
pub const REF: &str = "Ref";
/// Company long name.
pub const NAME: &str = "Name of Company";
/// Ticker code.
pub const CODE: &str = "Code";
/// Website.
pub const WEBSITE: &str = "Website";
/// Ownership summary.
pub const SHAREHOLDERS: &str = "Major Shareholders";
/// Reporting currency.
pub const CURRENCY: &str = "Currency";
/// Rate into the base currency.
pub const EXCHANGE_RATE: &str = "Exchange Rate";
/// Fiscal year end, `Mon YYYY`.
pub const FY: &str = "FY";
/// Business segments.
pub const SEGMENTS: &str = "Segments";
/// Debt to equity ratio.
pub const DEBT_EQUITY: &str = "Debt/Equity(%)";
/// Loan to equity ratio.
pub const LOAN_EQUITY: &str = "Loan/Equity (%)";
/// Previous close.
pub const STOCK_PRICE: &str = "Stock Price";
/// Business summary.
pub const SUMMARY: &str = "Summary of Business";
/// Chief executive or chairman.
pub const TOP_EXECUTIVE: &str = "Chairman / CEO";
/// Postal address.
pub const ADDRESS: &str = "Address";
/// Phone number.
pub const PHONE: &str = "Contact No.";
/// Full-time employees.
pub const EMPLOYEES: &str = "Number of Employee";
/// Provider sector.
pub const SECTOR: &str = "Category Classification/YahooFin";
/// Provider industry.
pub const INDUSTRY: &str = "Sector & Industry/YahooFin";
/// Market segment.
pub const MARKET: &str = "Market";

/// Revenue, before the unit suffix.
pub const REVENUE: &str = "REVENUE";
/// Profit, before the unit suffix.
pub const PROFIT: &str = "PROFIT";
/// Gross profit, before the unit suffix.
pub const GROSS_PROFIT: &str = "GROSS PROFIT";
/// Operating profit, before the unit suffix.
pub const OPERATING_PROFIT: &str = "OPERATING PROFIT";
/// Group net profit, before the unit suffix.
pub const NET_PROFIT_GROUP: &str = "NET PROFIT (Group)";
/// Shareholders' net profit, before the unit suffix.
pub const NET_PROFIT_SHAREHOLDERS: &str = "NET PROFIT (Shareholders)";
/// Minority interest, before the unit suffix.
pub const MINORITY_INTEREST: &str = "Minority Interest";
/// Shareholders' equity, before the unit suffix.
pub const SHAREHOLDERS_EQUITY: &str = "Shareholders' Equity";
/// Total equity, before the unit suffix.
pub const TOTAL_EQUITY: &str = "Total Equity";
/// Total assets, before the unit suffix.
pub const TOTAL_ASSETS: &str = "TOTAL ASSET";
/// Loan, before the unit suffix.
pub const LOAN: &str = "Loan";
/// Market cap, before the unit suffix.
pub const MARKET_CAP: &str = "Market Cap";
/// Shares outstanding, before the unit suffix.
pub const SHARES_OUTSTANDING: &str = "Shares Outstanding";

/// Columns divided by the [`Scale`] divisor.
pub const MONEY_COLUMNS: [&str; 13] = [
    REVENUE,
    PROFIT,
    GROSS_PROFIT,
    OPERATING_PROFIT,
    NET_PROFIT_GROUP,
    NET_PROFIT_SHAREHOLDERS,
    MINORITY_INTEREST,
    SHAREHOLDERS_EQUITY,
    TOTAL_EQUITY,
    TOTAL_ASSETS,
    LOAN,
    MARKET_CAP,
    SHARES_OUTSTANDING,
];

/// Columns holding ratios, NaN when undefined.
pub const RATIO_COLUMNS: [&str; 2] = [DEBT_EQUITY, LOAN_EQUITY];

/// Unit monetary columns are reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scale {
    /// Thousands, `('000)`
    #[default]
    Thousands,
    /// Millions, `(Mil)`
    Millions,
}

impl Scale {
    /// Value each monetary figure is divided by.
    pub const fn divisor(&self) -> f64 {
        match self {
            Self::Thousands => 1_000.0,
            Self::Millions => 1_000_000.0,
        }
    }

    /// Suffix appended to monetary column labels.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Thousands => "('000)",
            Self::Millions => "(Mil)",
        }
    }

    /// `label` with this scale's unit suffix.
    pub fn label(&self, label: &str) -> String {
        format!("{label} {}", self.suffix())
    }

    /// Every export column, in output order.
    pub fn columns(&self) -> Vec<String> {
        let money = |label: &str| self.label(label);
        vec![
            REF.to_string(),
            NAME.to_string(),
            CODE.to_string(),
            WEBSITE.to_string(),
            SHAREHOLDERS.to_string(),
            CURRENCY.to_string(),
            EXCHANGE_RATE.to_string(),
            FY.to_string(),
            money(REVENUE),
            SEGMENTS.to_string(),
            money(PROFIT),
            money(GROSS_PROFIT),
            money(OPERATING_PROFIT),
            money(NET_PROFIT_GROUP),
            money(NET_PROFIT_SHAREHOLDERS),
            money(MINORITY_INTEREST),
            money(SHAREHOLDERS_EQUITY),
            money(TOTAL_EQUITY),
            money(TOTAL_ASSETS),
            DEBT_EQUITY.to_string(),
            money(LOAN),
            LOAN_EQUITY.to_string(),
            STOCK_PRICE.to_string(),
            money(SHARES_OUTSTANDING),
            money(MARKET_CAP),
            SUMMARY.to_string(),
            TOP_EXECUTIVE.to_string(),
            ADDRESS.to_string(),
            PHONE.to_string(),
            EMPLOYEES.to_string(),
            SECTOR.to_string(),
            INDUSTRY.to_string(),
            MARKET.to_string(),
        ]
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thousands => write!(f, "thousands"),
            Self::Millions => write!(f, "millions"),
        }
    }
}

impl FromStr for Scale {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "thousands" | "000" | "k" => Ok(Self::Thousands),
            "millions" | "mil" | "m" => Ok(Self::Millions),
            other => Err(ExportError::InvalidFormat(format!("unknown scale: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_scale_units() {
        assert_eq!(Scale::Thousands.divisor(), 1_000.0);
        assert_eq!(Scale::Millions.divisor(), 1_000_000.0);
        assert_eq!(Scale::Thousands.label(REVENUE), "REVENUE ('000)");
        assert_eq!(Scale::Millions.label(TOTAL_ASSETS), "TOTAL ASSET (Mil)");
    }

    #[test]
    fn test_columns_are_unique() {
        let columns = Scale::Thousands.columns();
        let mut sorted = columns.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), columns.len());
        assert_eq!(columns.first().map(String::as_str), Some(REF));
        for label in MONEY_COLUMNS {
            assert!(columns.contains(&Scale::Thousands.label(label)));
        }
    }

    #[rstest]
    #[case("thousands", Scale::Thousands)]
    #[case("000", Scale::Thousands)]
    #[case("Millions", Scale::Millions)]
    #[case(" mil ", Scale::Millions)]
    fn test_parse_scale(#[case] input: &str, #[case] expected: Scale) {
        assert_eq!(input.parse::<Scale>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_scale() {
        assert!("billions".parse::<Scale>().is_err());
    }
}
