//! Candidate line-item names per metric.
//!
//! Row names for the same concept vary between tickers and filing templates.
//! [`LineItemMap`] holds an ordered list of candidate names for every metric;
//! the first candidate that resolves to a non-zero value wins. Maps load from
//! JSON and can be overlaid on the defaults.

use crate::resolver::{PeriodView, Statement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Logical metrics resolved from the statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total revenue
    Revenue,
    /// Pre-tax profit, falling back to operating profit
    Profit,
    /// Operating profit
    OperatingProfit,
    /// Gross profit
    GrossProfit,
    /// Net profit attributable to shareholders
    NetProfitShareholders,
    /// Net profit including non-controlling interests
    NetProfitGroup,
    /// Minority (non-controlling) interest
    MinorityInterest,
    /// Shareholders' equity
    ShareholdersEquity,
    /// Total assets
    TotalAssets,
    /// Total equity including minority interest
    TotalEquity,
    /// Total debt
    TotalDebt,
    /// Capital lease obligations
    CapitalLease,
    /// Short-term borrowings
    CurrentDebt,
    /// Long-term borrowings
    LongTermDebt,
}

impl Metric {
    /// Returns all metrics.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Revenue,
            Self::Profit,
            Self::OperatingProfit,
            Self::GrossProfit,
            Self::NetProfitShareholders,
            Self::NetProfitGroup,
            Self::MinorityInterest,
            Self::ShareholdersEquity,
            Self::TotalAssets,
            Self::TotalEquity,
            Self::TotalDebt,
            Self::CapitalLease,
            Self::CurrentDebt,
            Self::LongTermDebt,
        ]
    }
}

/// Where a metric is read from and which row names to try, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricChain {
    /// Statement holding the line items
    pub statement: Statement,
    /// Candidate row names, tried first to last
    pub candidates: Vec<String>,
}

impl MetricChain {
    /// Create a chain over `statement` trying `candidates` in order.
    pub fn new(statement: Statement, candidates: &[&str]) -> Self {
        Self {
            statement,
            candidates: candidates.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Ordered candidate line items for every metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemMap {
    chains: HashMap<Metric, MetricChain>,
}

impl LineItemMap {
    /// An empty map; every metric resolves to zero.
    pub fn empty() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    /// Replace the chain for `metric`.
    pub fn with_chain(mut self, metric: Metric, chain: MetricChain) -> Self {
        self.chains.insert(metric, chain);
        self
    }

    /// Chain configured for `metric`.
    pub fn chain(&self, metric: Metric) -> Option<&MetricChain> {
        self.chains.get(&metric)
    }

    /// Apply `overrides` on top of this map, metric by metric.
    pub fn overlay(mut self, overrides: Self) -> Self {
        self.chains.extend(overrides.chains);
        self
    }

    /// First non-zero value among the candidates for `metric`, else `0.0`.
    pub fn resolve(&self, view: &PeriodView<'_>, metric: Metric) -> f64 {
        let Some(chain) = self.chain(metric) else {
            tracing::debug!(?metric, "no line items configured");
            return 0.0;
        };

        for candidate in &chain.candidates {
            let value = view.resolve(chain.statement, candidate);
            if value != 0.0 {
                tracing::trace!(?metric, %candidate, value, "resolved");
                return value;
            }
        }

        0.0
    }
}

impl Default for LineItemMap {
    fn default() -> Self {
        use Statement::{BalanceSheet, IncomeStatement};

        Self::empty()
            // Income statement
            .with_chain(Metric::Revenue, MetricChain::new(IncomeStatement, &["Total Revenue"]))
            .with_chain(
                Metric::Profit,
                MetricChain::new(IncomeStatement, &["Pretax Income", "Operating Income"]),
            )
            .with_chain(
                Metric::OperatingProfit,
                MetricChain::new(IncomeStatement, &["Operating Income"]),
            )
            .with_chain(Metric::GrossProfit, MetricChain::new(IncomeStatement, &["Gross Profit"]))
            .with_chain(
                Metric::NetProfitShareholders,
                MetricChain::new(IncomeStatement, &["Net Income", "Net Income Common Stock"]),
            )
            .with_chain(
                Metric::NetProfitGroup,
                MetricChain::new(
                    IncomeStatement,
                    &[
                        "Net Income Including Noncontrolling Interests",
                        "Net Income Continuous Operations",
                    ],
                ),
            )
            // Balance sheet
            .with_chain(
                Metric::MinorityInterest,
                MetricChain::new(BalanceSheet, &["Minority Interest"]),
            )
            .with_chain(
                Metric::ShareholdersEquity,
                MetricChain::new(BalanceSheet, &["Stockholders Equity"]),
            )
            .with_chain(Metric::TotalAssets, MetricChain::new(BalanceSheet, &["Total Assets"]))
            .with_chain(
                Metric::TotalEquity,
                MetricChain::new(BalanceSheet, &["Total Equity Gross Minority Interest"]),
            )
            .with_chain(Metric::TotalDebt, MetricChain::new(BalanceSheet, &["Total Debt"]))
            .with_chain(
                Metric::CapitalLease,
                MetricChain::new(BalanceSheet, &["Capital Lease Obligations"]),
            )
            .with_chain(
                Metric::CurrentDebt,
                MetricChain::new(
                    BalanceSheet,
                    &["Short Long Term Debt", "Current Debt", "Short Term Debt"],
                ),
            )
            .with_chain(Metric::LongTermDebt, MetricChain::new(BalanceSheet, &["Long Term Debt"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use straits_data::StatementTable;

    #[test]
    fn test_default_covers_every_metric() {
        let map = LineItemMap::default();
        for metric in Metric::all() {
            let chain = map.chain(metric).unwrap();
            assert!(!chain.candidates.is_empty(), "{metric:?} has no candidates");
        }
    }

    #[test]
    fn test_chain_order() {
        let map = LineItemMap::default();
        let chain = map.chain(Metric::CurrentDebt).unwrap();
        assert_eq!(chain.statement, Statement::BalanceSheet);
        assert_eq!(
            chain.candidates,
            vec!["Short Long Term Debt", "Current Debt", "Short Term Debt"]
        );
    }

    #[test]
    fn test_first_non_zero_candidate_wins() {
        let bs = StatementTable::from_rows(
            ["2023-12-31"],
            [
                ("Short Long Term Debt", vec![Some(0.0)]),
                ("Current Debt", vec![None]),
                ("Short Term Debt", vec![Some(42.0)]),
            ],
        );
        let view = PeriodView::new(Some(&bs), None);

        let map = LineItemMap::default();
        assert_eq!(map.resolve(&view, Metric::CurrentDebt), 42.0);
        assert_eq!(map.resolve(&view, Metric::LongTermDebt), 0.0);
    }

    #[test]
    fn test_unconfigured_metric_is_zero() {
        let bs = StatementTable::from_rows(["2023-12-31"], [("Total Assets", vec![Some(1.0)])]);
        let view = PeriodView::new(Some(&bs), None);

        assert_eq!(LineItemMap::empty().resolve(&view, Metric::TotalAssets), 0.0);
    }

    #[test]
    fn test_overlay_from_json() {
        let overrides: LineItemMap = serde_json::from_str(
            r#"{"revenue": {"statement": "income_statement", "candidates": ["Operating Revenue", "Total Revenue"]}}"#,
        )
        .unwrap();

        let map = LineItemMap::default().overlay(overrides);
        assert_eq!(
            map.chain(Metric::Revenue).unwrap().candidates,
            vec!["Operating Revenue", "Total Revenue"]
        );
        assert_eq!(
            map.chain(Metric::TotalDebt).unwrap().candidates,
            vec!["Total Debt"]
        );
    }
}
