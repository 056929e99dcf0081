//! Line-item lookup for a single reporting period.
//!
//! Absence is the normal case here: upstream statements are sparse and their
//! row names drift between tickers, so every lookup that cannot be satisfied
//! yields `0.0` instead of an error.

use serde::{Deserialize, Serialize};
use straits_data::StatementTable;

/// Which statement a line item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Balance sheet
    BalanceSheet,
    /// Income statement
    IncomeStatement,
}

/// Value of `line_item` in `period`, or `0.0`.
///
/// Returns the cell only if the table is present and non-empty, the row
/// exists, `period` is `Some` and exists as a column, and the cell holds a
/// finite number.
pub fn resolve(table: Option<&StatementTable>, line_item: &str, period: Option<&str>) -> f64 {
    match (table, period) {
        (Some(table), Some(period)) if !table.is_empty() => {
            table.value(line_item, period).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Most recent period: the balance sheet's first column, else the income
/// statement's first column.
pub fn latest_period<'a>(
    balance_sheet: Option<&'a StatementTable>,
    income_statement: Option<&'a StatementTable>,
) -> Option<&'a str> {
    balance_sheet
        .and_then(StatementTable::latest_period)
        .or_else(|| income_statement.and_then(StatementTable::latest_period))
}

/// Both statements of one record pinned to a single period.
///
/// Every lookup made through a view uses the same period, so metrics for one
/// record can never mix reporting dates.
#[derive(Debug, Clone, Copy)]
pub struct PeriodView<'a> {
    balance_sheet: Option<&'a StatementTable>,
    income_statement: Option<&'a StatementTable>,
    period: Option<&'a str>,
}

impl<'a> PeriodView<'a> {
    /// Pin both statements to the period chosen by [`latest_period`].
    pub fn new(
        balance_sheet: Option<&'a StatementTable>,
        income_statement: Option<&'a StatementTable>,
    ) -> Self {
        Self {
            balance_sheet,
            income_statement,
            period: latest_period(balance_sheet, income_statement),
        }
    }

    /// The period every lookup uses.
    pub const fn period(&self) -> Option<&'a str> {
        self.period
    }

    /// Resolve `line_item` from `statement` at the pinned period.
    pub fn resolve(&self, statement: Statement, line_item: &str) -> f64 {
        let table = match statement {
            Statement::BalanceSheet => self.balance_sheet,
            Statement::IncomeStatement => self.income_statement,
        };
        resolve(table, line_item, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn income() -> StatementTable {
        StatementTable::from_rows(
            ["2023-12-31", "2022-12-31"],
            [
                ("Total Revenue", vec![Some(1000.0), Some(900.0)]),
                ("Net Income", vec![None, Some(50.0)]),
            ],
        )
    }

    fn balance() -> StatementTable {
        StatementTable::from_rows(
            ["2023-06-30", "2022-06-30"],
            [("Total Assets", vec![Some(5000.0), Some(4000.0)])],
        )
    }

    #[test]
    fn test_resolve_present() {
        let table = income();
        assert_eq!(resolve(Some(&table), "Total Revenue", Some("2023-12-31")), 1000.0);
        assert_eq!(resolve(Some(&table), "Total Revenue", Some("2022-12-31")), 900.0);
    }

    #[rstest]
    #[case::null_table(None, "Total Revenue", Some("2023-12-31"))]
    #[case::absent_name(Some(income()), "Gross Profit", Some("2023-12-31"))]
    #[case::absent_period(Some(income()), "Total Revenue", Some("2020-12-31"))]
    #[case::null_period(Some(income()), "Total Revenue", None)]
    #[case::missing_cell(Some(income()), "Net Income", Some("2023-12-31"))]
    #[case::empty_table(Some(StatementTable::default()), "Total Revenue", Some("2023-12-31"))]
    fn test_resolve_defaults_to_zero(
        #[case] table: Option<StatementTable>,
        #[case] line_item: &str,
        #[case] period: Option<&str>,
    ) {
        assert_eq!(resolve(table.as_ref(), line_item, period), 0.0);
    }

    #[test]
    fn test_latest_period_prefers_balance_sheet() {
        let (bs, inc) = (balance(), income());
        assert_eq!(latest_period(Some(&bs), Some(&inc)), Some("2023-06-30"));
        assert_eq!(latest_period(None, Some(&inc)), Some("2023-12-31"));
        assert_eq!(
            latest_period(Some(&StatementTable::default()), Some(&inc)),
            Some("2023-12-31")
        );
        assert_eq!(latest_period(None, None), None);
    }

    #[test]
    fn test_view_pins_single_period() {
        let (bs, inc) = (balance(), income());
        let view = PeriodView::new(Some(&bs), Some(&inc));

        assert_eq!(view.period(), Some("2023-06-30"));
        assert_eq!(view.resolve(Statement::BalanceSheet, "Total Assets"), 5000.0);
        // The income statement has no 2023-06-30 column, so nothing leaks in
        // from its own latest period.
        assert_eq!(view.resolve(Statement::IncomeStatement, "Total Revenue"), 0.0);
    }
}
