//! Ownership tables rendered as `name: value` lines.
//!
//! Holder tables have no stable layout. The shape heuristics:
//!
//! - [`locate_columns`]: find name and percentage columns by label keywords.
//! - [`percent_from_fraction`]: values below one are fractions, not percents.
//! - [`render_major_value`]: pass-through for `%` strings, percent for small
//!   numbers, raw otherwise.
//! - [`split_name_value`]: the longer of two cells is the description.

use serde::{Deserialize, Serialize};
use straits_data::{Cell, HolderTable};
use thiserror::Error;

/// Which ownership table is being formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderKind {
    /// Institutional holders (name + percent held columns)
    Institutional,
    /// Insider roster (same layout as institutional)
    Insider,
    /// Major holders breakdown
    Major,
}

impl HolderKind {
    /// Maximum number of lines produced for this kind.
    pub const fn row_limit(&self) -> usize {
        match self {
            Self::Institutional | Self::Insider => 10,
            Self::Major => 5,
        }
    }
}

/// Structural problems that abort formatting of a whole table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareholderError {
    /// A row is shorter than the column it must be read from.
    #[error("row {row} has {found} cells, column {column} requested")]
    RaggedRow {
        /// Zero-based row number
        row: usize,
        /// Requested column index
        column: usize,
        /// Cells actually present
        found: usize,
    },
}

/// Column positions of holder name and percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderColumns {
    /// Index of the holder name column
    pub name: usize,
    /// Index of the percentage column
    pub percent: usize,
}

/// Render an ownership table as newline-separated `name: value` lines.
///
/// Returns `None` for an absent or empty table, or when no line could be
/// produced. A structurally broken table yields `Some("Error parsing: ...")`
/// instead of partial output.
pub fn format_shareholders(table: Option<&HolderTable>, kind: HolderKind) -> Option<String> {
    let table = table.filter(|t| !t.is_empty())?;

    let lines = match format_lines(table, kind) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::debug!(?kind, error = %e, "holder table rejected");
            return Some(format!("Error parsing: {e}"));
        }
    };

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn format_lines(table: &HolderTable, kind: HolderKind) -> Result<Vec<String>, ShareholderError> {
    let limit = kind.row_limit();
    match kind {
        HolderKind::Institutional | HolderKind::Insider => named_percent_lines(table, limit),
        HolderKind::Major if table.columns.len() == 1 => labelled_value_lines(table, limit),
        HolderKind::Major => paired_cell_lines(table, limit),
    }
}

/// Find the holder-name and percentage columns by label keywords.
///
/// A label containing `holder` or `insider` names holders; one containing
/// `%`, `pct` or `out` holds percentages. Matching ignores case and the last
/// matching label wins. Both must be found.
pub fn locate_columns(columns: &[String]) -> Option<HolderColumns> {
    let mut name = None;
    let mut percent = None;

    for (i, label) in columns.iter().enumerate() {
        let label = label.to_lowercase();
        if label.contains("holder") || label.contains("insider") {
            name = Some(i);
        }
        if label.contains('%') || label.contains("pct") || label.contains("out") {
            percent = Some(i);
        }
    }

    Some(HolderColumns {
        name: name?,
        percent: percent?,
    })
}

/// Scale a fraction to a percentage; values of one or more are kept.
pub fn percent_from_fraction(value: f64) -> f64 {
    if value < 1.0 { value * 100.0 } else { value }
}

/// Text used for a missing holder cell.
pub const MISSING_VALUE: &str = "nan";

/// Cell text, [`MISSING_VALUE`] for an empty cell.
pub fn holder_text(cell: &Cell) -> String {
    if cell.is_empty() {
        MISSING_VALUE.to_string()
    } else {
        cell.to_string()
    }
}

/// Render a major-holders value.
///
/// Text already containing `%` passes through. Numbers up to one are shown as
/// a two-decimal percentage. Anything else is rendered raw, and a missing
/// value as [`MISSING_VALUE`].
pub fn render_major_value(cell: &Cell) -> String {
    if let Some(text) = cell.as_text()
        && text.contains('%')
    {
        return text.to_string();
    }
    match cell.as_f64() {
        Some(value) if value <= 1.0 => format!("{:.2}%", value * 100.0),
        _ => holder_text(cell),
    }
}

/// Decide which of two cells is the description by length.
///
/// Column order for this table shape is not consistent across tickers, so the
/// longer string is taken as the name and the other as the value. Ties keep
/// the first cell as the name.
pub fn split_name_value(first: String, second: String) -> (String, String) {
    if second.chars().count() > first.chars().count() {
        (second, first)
    } else {
        (first, second)
    }
}

fn cell_at(cells: &[Cell], column: usize, row: usize) -> Result<&Cell, ShareholderError> {
    cells.get(column).ok_or(ShareholderError::RaggedRow {
        row,
        column,
        found: cells.len(),
    })
}

fn named_percent_lines(table: &HolderTable, limit: usize) -> Result<Vec<String>, ShareholderError> {
    let Some(columns) = locate_columns(&table.columns) else {
        return Ok(Vec::new());
    };

    table
        .data
        .iter()
        .take(limit)
        .enumerate()
        .map(|(row, cells)| {
            let name = holder_text(cell_at(cells, columns.name, row)?);
            let value = cell_at(cells, columns.percent, row)?;
            Ok(match value.as_f64() {
                Some(v) => format!("{name}: {:.2}%", percent_from_fraction(v)),
                None if value.is_empty() => format!("{name}: {MISSING_VALUE}%"),
                None => format!("{name}: {value}"),
            })
        })
        .collect()
}

fn labelled_value_lines(table: &HolderTable, limit: usize) -> Result<Vec<String>, ShareholderError> {
    table
        .data
        .iter()
        .take(limit)
        .enumerate()
        .map(|(row, cells)| {
            let value = cell_at(cells, 0, row)?;
            Ok(format!("{}: {}", table.row_label(row), render_major_value(value)))
        })
        .collect()
}

fn paired_cell_lines(table: &HolderTable, limit: usize) -> Result<Vec<String>, ShareholderError> {
    let mut lines = Vec::new();
    for (row, cells) in table.data.iter().take(limit).enumerate() {
        let first = cell_at(cells, 0, row)?.to_string();
        let second = cell_at(cells, 1, row)?.to_string();
        let (name, value) = split_name_value(first, second);
        if !name.is_empty() {
            lines.push(format!("{name}: {value}"));
        }
    }
    Ok(lines)
}
