//! The normalized per-company record.

use crate::market_tier::MarketTier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text used wherever a descriptive field could not be sourced.
pub const NOT_AVAILABLE: &str = "Not Available";

/// One company in the canonical schema.
///
/// Statement and market figures are in the reporting currency and default to
/// `0.0` when the provider had nothing. Ratios are `None` when undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    // Identity
    /// Ticker code, e.g. `4863.KL`
    pub code: String,
    /// Company long name
    pub name: String,
    /// Company website
    pub website: String,
    /// Postal address, comma separated
    pub address: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Reporting currency
    pub currency: String,
    /// Market segment
    pub market: MarketTier,
    /// Provider sector
    pub sector: String,
    /// Provider industry
    pub industry: String,
    /// Full-time employees
    pub employees: u64,

    // Income statement
    /// Total revenue
    pub revenue: f64,
    /// Pre-tax profit, or operating profit when unreported
    pub profit: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Operating profit
    pub operating_profit: f64,
    /// Net profit including non-controlling interests
    pub net_profit_group: f64,
    /// Net profit attributable to shareholders
    pub net_profit_shareholders: f64,

    // Balance sheet
    /// Minority interest
    pub minority_interest: f64,
    /// Shareholders' equity
    pub shareholders_equity: f64,
    /// Total equity
    pub total_equity: f64,
    /// Total assets
    pub total_assets: f64,
    /// Borrowings net of lease obligations
    pub loan: f64,

    // Ratios
    /// Liabilities over total equity
    pub debt_equity_ratio: Option<f64>,
    /// Loan over total equity
    pub loan_equity_ratio: Option<f64>,

    // Narrative
    /// Long business summary
    pub business_summary: String,
    /// Chief executive or chairman, `name (title)`
    pub top_executive: String,
    /// Business segments, comma separated
    pub segments: String,

    // Market data
    /// Previous close
    pub stock_price: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
    /// Market capitalization
    pub market_cap: f64,
    /// Conversion rate into the base currency
    pub exchange_rate: Option<f64>,

    /// Major or institutional holders, one `name: value` per line
    pub shareholders: String,
    /// Last fiscal year end
    pub fiscal_year_end: Option<NaiveDate>,
}

impl CanonicalRecord {
    /// A record with every field at its default.
    pub fn empty(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            website: String::new(),
            address: String::new(),
            phone: None,
            currency: "N/A".to_string(),
            market: MarketTier::Exchange("Unknown".to_string()),
            sector: NOT_AVAILABLE.to_string(),
            industry: NOT_AVAILABLE.to_string(),
            employees: 0,
            revenue: 0.0,
            profit: 0.0,
            gross_profit: 0.0,
            operating_profit: 0.0,
            net_profit_group: 0.0,
            net_profit_shareholders: 0.0,
            minority_interest: 0.0,
            shareholders_equity: 0.0,
            total_equity: 0.0,
            total_assets: 0.0,
            loan: 0.0,
            debt_equity_ratio: None,
            loan_equity_ratio: None,
            business_summary: String::new(),
            top_executive: "N/A".to_string(),
            segments: String::new(),
            stock_price: 0.0,
            shares_outstanding: 0.0,
            market_cap: 0.0,
            exchange_rate: None,
            shareholders: NOT_AVAILABLE.to_string(),
            fiscal_year_end: None,
        }
    }
}
