//! Presentation table built from canonical records.

use crate::columns::{self, Scale};
use crate::export::ExportError;
use polars::prelude::*;
use straits_extract::CanonicalRecord;

/// Fiscal year format, e.g. `Dec 2023`.
pub const FY_FORMAT: &str = "%b %Y";

/// Build the export table for `records`.
///
/// Monetary columns are divided by the scale's divisor and carry its unit
/// suffix. Undefined ratios become NaN, a missing fiscal year an empty string.
/// Rows keep the order of `records` and are numbered from 1 in [`columns::REF`].
///
/// # Errors
///
/// Returns an error if the frame cannot be assembled.
pub fn format_for_export(
    records: &[CanonicalRecord],
    scale: Scale,
) -> Result<DataFrame, ExportError> {
    let divisor = scale.divisor();

    let text = |label: &str, field: fn(&CanonicalRecord) -> &str| -> Column {
        let values: Vec<&str> = records.iter().map(field).collect();
        Series::new(label.into(), values).into()
    };
    let money = |label: &str, field: fn(&CanonicalRecord) -> f64| -> Column {
        let values: Vec<f64> = records.iter().map(|r| field(r) / divisor).collect();
        Series::new(scale.label(label).into(), values).into()
    };
    let ratio = |label: &str, field: fn(&CanonicalRecord) -> Option<f64>| -> Column {
        let values: Vec<f64> = records.iter().map(|r| field(r).unwrap_or(f64::NAN)).collect();
        Series::new(label.into(), values).into()
    };

    let refs: Vec<u32> = (1..).take(records.len()).collect();
    let fiscal_years: Vec<String> = records
        .iter()
        .map(|r| {
            r.fiscal_year_end
                .map(|d| d.format(FY_FORMAT).to_string())
                .unwrap_or_default()
        })
        .collect();
    let exchange_rates: Vec<Option<f64>> = records.iter().map(|r| r.exchange_rate).collect();
    let prices: Vec<f64> = records.iter().map(|r| r.stock_price).collect();
    let phones: Vec<Option<&str>> = records.iter().map(|r| r.phone.as_deref()).collect();
    let employees: Vec<u64> = records.iter().map(|r| r.employees).collect();
    let markets: Vec<String> = records.iter().map(|r| r.market.to_string()).collect();

    let df = DataFrame::new(vec![
        Series::new(columns::REF.into(), refs).into(),
        text(columns::NAME, |r| r.name.as_str()),
        text(columns::CODE, |r| r.code.as_str()),
        text(columns::WEBSITE, |r| r.website.as_str()),
        text(columns::SHAREHOLDERS, |r| r.shareholders.as_str()),
        text(columns::CURRENCY, |r| r.currency.as_str()),
        Series::new(columns::EXCHANGE_RATE.into(), exchange_rates).into(),
        Series::new(columns::FY.into(), fiscal_years).into(),
        money(columns::REVENUE, |r| r.revenue),
        text(columns::SEGMENTS, |r| r.segments.as_str()),
        money(columns::PROFIT, |r| r.profit),
        money(columns::GROSS_PROFIT, |r| r.gross_profit),
        money(columns::OPERATING_PROFIT, |r| r.operating_profit),
        money(columns::NET_PROFIT_GROUP, |r| r.net_profit_group),
        money(columns::NET_PROFIT_SHAREHOLDERS, |r| r.net_profit_shareholders),
        money(columns::MINORITY_INTEREST, |r| r.minority_interest),
        money(columns::SHAREHOLDERS_EQUITY, |r| r.shareholders_equity),
        money(columns::TOTAL_EQUITY, |r| r.total_equity),
        money(columns::TOTAL_ASSETS, |r| r.total_assets),
        ratio(columns::DEBT_EQUITY, |r| r.debt_equity_ratio),
        money(columns::LOAN, |r| r.loan),
        ratio(columns::LOAN_EQUITY, |r| r.loan_equity_ratio),
        Series::new(columns::STOCK_PRICE.into(), prices).into(),
        money(columns::SHARES_OUTSTANDING, |r| r.shares_outstanding),
        money(columns::MARKET_CAP, |r| r.market_cap),
        text(columns::SUMMARY, |r| r.business_summary.as_str()),
        text(columns::TOP_EXECUTIVE, |r| r.top_executive.as_str()),
        text(columns::ADDRESS, |r| r.address.as_str()),
        Series::new(columns::PHONE.into(), phones).into(),
        Series::new(columns::EMPLOYEES.into(), employees).into(),
        text(columns::SECTOR, |r| r.sector.as_str()),
        text(columns::INDUSTRY, |r| r.industry.as_str()),
        Series::new(columns::MARKET.into(), markets).into(),
    ])?;

    Ok(df)
}
