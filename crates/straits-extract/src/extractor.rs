//! Raw provider record to [`CanonicalRecord`].

use crate::line_items::{LineItemMap, Metric};
use crate::market_tier::classify;
use crate::record::{CanonicalRecord, NOT_AVAILABLE};
use crate::resolver::PeriodView;
use crate::shareholders::{HolderKind, format_shareholders};
use chrono::{DateTime, NaiveDate};
use straits_data::{CompanyInfo, Officer, RawRecord};

pub use straits_data::RENMINBI_LABEL;

/// Turns raw records into canonical ones using a configurable line-item map.
///
/// Extraction is pure: the same input always yields the same record, and the
/// only side effect is `tracing` output.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    line_items: LineItemMap,
}

impl Extractor {
    /// Create an extractor over `line_items`.
    pub const fn new(line_items: LineItemMap) -> Self {
        Self { line_items }
    }

    /// Line-item map in use.
    pub const fn line_items(&self) -> &LineItemMap {
        &self.line_items
    }

    /// Extract the canonical record for `code`.
    pub fn extract(&self, code: &str, raw: &RawRecord) -> CanonicalRecord {
        let info = &raw.info;
        let view = PeriodView::new(raw.balance_sheet.as_ref(), raw.financials.as_ref());
        tracing::debug!(%code, period = ?view.period(), "extracting");

        let metric = |m: Metric| self.line_items.resolve(&view, m);

        let revenue = metric(Metric::Revenue);
        let profit = metric(Metric::Profit);
        let operating_profit = metric(Metric::OperatingProfit);
        let gross_profit = metric(Metric::GrossProfit);

        let net_profit_shareholders = metric(Metric::NetProfitShareholders);
        let mut net_profit_group = metric(Metric::NetProfitGroup);
        if net_profit_group == 0.0 && net_profit_shareholders != 0.0 {
            net_profit_group = net_profit_shareholders;
        }

        let minority_interest = metric(Metric::MinorityInterest);
        let shareholders_equity = metric(Metric::ShareholdersEquity);
        let total_assets = metric(Metric::TotalAssets);
        let mut total_equity = metric(Metric::TotalEquity);
        if total_equity == 0.0 && shareholders_equity != 0.0 {
            total_equity = shareholders_equity + minority_interest;
        }

        let loan = net_loan(
            metric(Metric::TotalDebt),
            metric(Metric::CapitalLease),
            metric(Metric::CurrentDebt),
            metric(Metric::LongTermDebt),
        );

        let (stock_price, shares_outstanding, market_cap) = market_data(info);

        CanonicalRecord {
            code: code.to_string(),
            name: info.text("longName").unwrap_or_default().to_string(),
            website: info.text("website").unwrap_or_default().to_string(),
            address: address(info),
            phone: info.display("phone"),
            currency: currency(info),
            market: classify(code, info.text("exchange").unwrap_or("Unknown")),
            sector: info.text("sector").unwrap_or(NOT_AVAILABLE).to_string(),
            industry: info.text("industry").unwrap_or(NOT_AVAILABLE).to_string(),
            employees: info
                .integer("fullTimeEmployees")
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0),
            revenue,
            profit,
            gross_profit,
            operating_profit,
            net_profit_group,
            net_profit_shareholders,
            minority_interest,
            shareholders_equity,
            total_equity,
            total_assets,
            loan,
            debt_equity_ratio: debt_equity_ratio(total_assets, total_equity),
            loan_equity_ratio: loan_equity_ratio(loan, total_equity),
            business_summary: info
                .text("longBusinessSummary")
                .unwrap_or_default()
                .to_string(),
            top_executive: top_executive(&info.officers()),
            segments: String::new(),
            stock_price,
            shares_outstanding,
            market_cap,
            exchange_rate: None,
            shareholders: shareholder_text(raw),
            fiscal_year_end: fiscal_year_end(info),
        }
    }
}

/// Major holders, else institutional holders, else `Not Available`.
pub fn shareholder_text(raw: &RawRecord) -> String {
    format_shareholders(raw.major_holders.as_ref(), HolderKind::Major)
        .or_else(|| {
            format_shareholders(raw.institutional_holders.as_ref(), HolderKind::Institutional)
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Borrowings excluding lease obligations.
///
/// Total debt has capital leases removed when both are reported and the lease
/// is smaller. With no total debt, current and long-term debt are summed.
pub fn net_loan(total_debt: f64, capital_lease: f64, current: f64, long_term: f64) -> f64 {
    let mut loan = total_debt;
    if loan != 0.0 && capital_lease != 0.0 && capital_lease < loan {
        loan -= capital_lease;
    }
    if loan == 0.0 {
        loan = current + long_term;
    }
    loan
}

/// `(assets - equity) / equity`, undefined without assets or equity.
pub fn debt_equity_ratio(total_assets: f64, total_equity: f64) -> Option<f64> {
    (total_equity != 0.0 && total_assets != 0.0)
        .then(|| (total_assets - total_equity) / total_equity)
}

/// `loan / equity`, undefined without equity.
pub fn loan_equity_ratio(loan: f64, total_equity: f64) -> Option<f64> {
    (total_equity != 0.0).then(|| loan / total_equity)
}

/// First CEO or chairman as `name (title)`, else the first officer's name.
pub fn top_executive(officers: &[Officer]) -> String {
    let leader = officers.iter().find_map(|officer| {
        let title = officer.title.as_deref()?;
        let lower = title.to_lowercase();
        (lower.contains("ceo") || lower.contains("chairman")).then(|| {
            format!("{} ({title})", officer.name.as_deref().unwrap_or("N/A"))
        })
    });

    leader
        .or_else(|| officers.first().and_then(|o| o.name.clone()))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Currency display label; `CNY` becomes [`RENMINBI_LABEL`].
pub fn normalize_currency(code: &str) -> String {
    if code == "CNY" {
        RENMINBI_LABEL.to_string()
    } else {
        code.to_string()
    }
}

fn currency(info: &CompanyInfo) -> String {
    let code = info
        .text("financialCurrency")
        .or_else(|| info.text("currency"))
        .unwrap_or("N/A");
    normalize_currency(code)
}

/// Date of `lastFiscalYearEnd` (epoch seconds, UTC).
pub fn fiscal_year_end(info: &CompanyInfo) -> Option<NaiveDate> {
    let seconds = info.integer("lastFiscalYearEnd").filter(|&s| s != 0)?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Non-empty address parts joined by `", "`.
pub fn address(info: &CompanyInfo) -> String {
    ["address1", "address2", "city", "country", "zip"]
        .iter()
        .filter_map(|key| info.display(key))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `(price, shares outstanding, market cap)`.
///
/// Price is the previous close, falling back to the live price. Market cap is
/// recomputed from that price when possible so both refer to the same close.
fn market_data(info: &CompanyInfo) -> (f64, f64, f64) {
    let price = info
        .number("previousClose")
        .or_else(|| info.number("regularMarketPrice"))
        .unwrap_or(0.0);
    let shares = info.number("sharesOutstanding").unwrap_or(0.0);

    let market_cap = if price != 0.0 && shares != 0.0 {
        price * shares
    } else {
        info.number("marketCap").unwrap_or(0.0)
    };

    (price, shares, market_cap)
}
