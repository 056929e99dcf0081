//! Raw provider records.
//!
//! A [`RawRecord`] is one ticker's snapshot as delivered by the market-data
//! provider. Tables use the "split" orientation (`columns`, `index`, `data`)
//! that dataframe dumps produce.
//! Nothing in here interprets the data; see `straits-extract` for that.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One ticker's raw snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Company metadata and market data (`ticker.info`)
    #[serde(default)]
    pub info: CompanyInfo,
    /// Annual balance sheet
    #[serde(default)]
    pub balance_sheet: Option<StatementTable>,
    /// Annual income statement
    #[serde(default)]
    pub financials: Option<StatementTable>,
    /// Major holders breakdown
    #[serde(default)]
    pub major_holders: Option<HolderTable>,
    /// Institutional holders
    #[serde(default)]
    pub institutional_holders: Option<HolderTable>,
}

/// Free-form company attributes keyed by provider field name.
///
/// Missing keys, `null`, empty strings and values of the wrong type are all
/// reported as absent by the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyInfo(Map<String, Value>);

impl CompanyInfo {
    /// Wrap an existing JSON object.
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Whether no attributes were delivered at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value for a key, `None` for missing or `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string value.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// String or number rendered as text; empty strings and zero are absent.
    pub fn display(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value. Numeric strings are accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Integral value; finite floats are truncated.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            _ => None,
        }
    }

    /// Company officers. Entries that are not objects are skipped.
    pub fn officers(&self) -> Vec<Officer> {
        self.get("companyOfficers")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| Officer::deserialize(v).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl FromIterator<(String, Value)> for CompanyInfo {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A company officer as listed in `companyOfficers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// Officer name
    #[serde(default)]
    pub name: Option<String>,
    /// Job title
    #[serde(default)]
    pub title: Option<String>,
}

/// A financial statement: line items by reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    /// Period labels, most recent first
    #[serde(rename = "columns", default, deserialize_with = "labels")]
    pub periods: Vec<String>,
    /// Line-item names
    #[serde(rename = "index", default, deserialize_with = "labels")]
    pub line_items: Vec<String>,
    /// Row-major cells, `None` where the provider had no value
    #[serde(default)]
    pub data: Vec<Vec<Option<f64>>>,
}

impl StatementTable {
    /// Build a table from period labels and `(line item, cells)` rows.
    pub fn from_rows<P, N>(
        periods: impl IntoIterator<Item = P>,
        rows: impl IntoIterator<Item = (N, Vec<Option<f64>>)>,
    ) -> Self
    where
        P: Into<String>,
        N: Into<String>,
    {
        let (line_items, data) = rows
            .into_iter()
            .map(|(name, cells)| (name.into(), cells))
            .unzip();
        Self {
            periods: periods.into_iter().map(Into::into).collect(),
            line_items,
            data,
        }
    }

    /// A table with no periods or no line items holds nothing.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.line_items.is_empty()
    }

    /// Most recent period label.
    pub fn latest_period(&self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.periods.first().map(String::as_str)
    }

    /// Whether the table has a row for `line_item`.
    pub fn has_line_item(&self, line_item: &str) -> bool {
        self.line_items.iter().any(|l| l == line_item)
    }

    /// Cell at `(line_item, period)`. Non-finite cells count as missing.
    pub fn value(&self, line_item: &str, period: &str) -> Option<f64> {
        let row = self.line_items.iter().position(|l| l == line_item)?;
        let column = self.periods.iter().position(|p| p == period)?;
        self.data
            .get(row)?
            .get(column)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

/// An ownership table whose column layout differs between tickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolderTable {
    /// Column labels
    #[serde(default, deserialize_with = "labels")]
    pub columns: Vec<String>,
    /// Row labels
    #[serde(default, deserialize_with = "labels")]
    pub index: Vec<String>,
    /// Row-major cells
    #[serde(default)]
    pub data: Vec<Vec<Cell>>,
}

impl HolderTable {
    /// Build a table from column labels and `(row label, cells)` rows.
    pub fn from_rows<C, R>(
        columns: impl IntoIterator<Item = C>,
        rows: impl IntoIterator<Item = (R, Vec<Cell>)>,
    ) -> Self
    where
        C: Into<String>,
        R: Into<String>,
    {
        let (index, data) = rows
            .into_iter()
            .map(|(label, cells)| (label.into(), cells))
            .unzip();
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            index,
            data,
        }
    }

    /// A table with no columns or no rows holds nothing.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.data.is_empty()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Label of row `row`; positional when the provider sent no index.
    pub fn row_label(&self, row: usize) -> String {
        self.index
            .get(row)
            .cloned()
            .unwrap_or_else(|| row.to_string())
    }
}

/// A heterogeneous table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric cell, kept in its original JSON form
    Number(serde_json::Number),
    /// Text cell
    Text(String),
    /// Boolean cell
    Flag(bool),
    /// Missing value
    Empty,
}

impl Cell {
    /// Numeric reading of the cell. Text is parsed after trimming, flags read
    /// as `1.0` and `0.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Flag(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Self::Empty => None,
        }
    }

    /// Whether the provider had no value here.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Self::Empty, Self::Number)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Flag(true) => f.write_str("True"),
            Self::Flag(false) => f.write_str("False"),
            Self::Empty => Ok(()),
        }
    }
}

/// Axis labels may arrive as strings or as epoch-millisecond numbers.
fn labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn balance_sheet() -> StatementTable {
        StatementTable::from_rows(
            ["2023-12-31", "2022-12-31"],
            [
                ("Total Assets", vec![Some(500.0), Some(450.0)]),
                ("Total Debt", vec![None, Some(10.0)]),
                ("Ragged", vec![Some(1.0)]),
            ],
        )
    }

    #[test]
    fn test_statement_value_lookup() {
        let bs = balance_sheet();
        assert_eq!(bs.value("Total Assets", "2023-12-31"), Some(500.0));
        assert_eq!(bs.value("Total Assets", "2022-12-31"), Some(450.0));
        assert_eq!(bs.value("Total Debt", "2023-12-31"), None);
        assert_eq!(bs.value("Ragged", "2022-12-31"), None);
        assert_eq!(bs.value("Missing", "2023-12-31"), None);
        assert_eq!(bs.value("Total Assets", "2021-12-31"), None);
    }

    #[test]
    fn test_statement_latest_period() {
        assert_eq!(balance_sheet().latest_period(), Some("2023-12-31"));
        assert_eq!(StatementTable::default().latest_period(), None);

        let no_rows = StatementTable::from_rows(["2023-12-31"], Vec::<(String, _)>::new());
        assert!(no_rows.is_empty());
        assert_eq!(no_rows.latest_period(), None);
    }

    #[test]
    fn test_statement_split_orientation() {
        let table: StatementTable = serde_json::from_value(json!({
            "columns": [1703980800000_i64, "2022-12-31"],
            "index": ["Total Revenue"],
            "data": [[100.0, null]]
        }))
        .unwrap();

        assert_eq!(table.periods, vec!["1703980800000", "2022-12-31"]);
        assert_eq!(table.value("Total Revenue", "1703980800000"), Some(100.0));
        assert_eq!(table.value("Total Revenue", "2022-12-31"), None);
    }

    #[test]
    fn test_company_info_accessors() {
        let info: CompanyInfo = serde_json::from_value(json!({
            "longName": "Axiata Group Berhad",
            "website": "",
            "zip": 50450,
            "previousClose": 2.31,
            "sharesOutstanding": "9180000000",
            "fullTimeEmployees": 12000.0,
            "sector": null
        }))
        .unwrap();

        assert_eq!(info.text("longName"), Some("Axiata Group Berhad"));
        assert_eq!(info.text("website"), None);
        assert_eq!(info.text("sector"), None);
        assert_eq!(info.display("zip"), Some("50450".to_string()));
        assert_eq!(info.number("previousClose"), Some(2.31));
        assert_eq!(info.number("sharesOutstanding"), Some(9_180_000_000.0));
        assert_eq!(info.integer("fullTimeEmployees"), Some(12000));
        assert_eq!(info.number("longName"), None);
    }

    #[test]
    fn test_officers_skip_malformed_entries() {
        let info: CompanyInfo = serde_json::from_value(json!({
            "companyOfficers": [
                {"name": "Dato' Lee", "title": "Group CEO", "age": 58},
                "not an officer",
                {"title": "Company Secretary"}
            ]
        }))
        .unwrap();

        let officers = info.officers();
        assert_eq!(officers.len(), 2);
        assert_eq!(officers[0].name.as_deref(), Some("Dato' Lee"));
        assert_eq!(officers[1].name, None);
        assert_eq!(officers[1].title.as_deref(), Some("Company Secretary"));
    }

    #[test]
    fn test_cell_rendering() {
        let cells: Vec<Cell> =
            serde_json::from_value(json!([0.5, 1234, 1234.0, "55.20%", null, true])).unwrap();

        let rendered: Vec<String> = cells.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["0.5", "1234", "1234.0", "55.20%", "", "True"]);
        assert_eq!(cells[0].as_f64(), Some(0.5));
        assert_eq!(cells[3].as_f64(), None);
        assert_eq!(cells[3].as_text(), Some("55.20%"));
        assert_eq!(cells[4].as_f64(), None);
        assert!(cells[4].is_empty());
        assert_eq!(cells[5].as_f64(), Some(1.0));
        assert_eq!(Cell::Flag(false).as_f64(), Some(0.0));
    }

    #[test]
    fn test_holder_table_row_labels() {
        let table = HolderTable::from_rows(["Value"], [("insidersPercentHeld", vec![Cell::from(0.6)])]);
        assert_eq!(table.row_label(0), "insidersPercentHeld");
        assert_eq!(table.row_label(3), "3");
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert!(HolderTable::default().is_empty());
    }
}
