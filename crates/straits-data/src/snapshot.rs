//! Raw record sources.
//!
//! The provider is opaque to the rest of the pipeline: anything that can hand
//! back a [`RawRecord`] for a ticker code is a [`RecordSource`].

use crate::error::{DataError, Result};
use crate::record::RawRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Something that yields raw records by ticker code.
pub trait RecordSource {
    /// Fetch the raw record for `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or unreadable.
    fn fetch(&self, code: &str) -> Result<RawRecord>;
}

/// Reads `<root>/<code>.json` snapshots written by the provider dump.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    root: PathBuf,
}

impl SnapshotSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the snapshots are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the snapshot file for `code`.
    pub fn path_for(&self, code: &str) -> PathBuf {
        self.root.join(format!("{code}.json"))
    }
}

impl RecordSource for SnapshotSource {
    fn fetch(&self, code: &str) -> Result<RawRecord> {
        validate_code(code)?;

        let path = self.path_for(code);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::MissingData {
                    symbol: code.to_string(),
                    reason: format!("no snapshot at {}", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let record: RawRecord = serde_json::from_str(&content)?;
        if record.info.is_empty() {
            return Err(DataError::MissingData {
                symbol: code.to_string(),
                reason: "snapshot has no company info".to_string(),
            });
        }

        Ok(record)
    }
}

impl RecordSource for BTreeMap<String, RawRecord> {
    fn fetch(&self, code: &str) -> Result<RawRecord> {
        self.get(code).cloned().ok_or_else(|| DataError::MissingData {
            symbol: code.to_string(),
            reason: "not in memory source".to_string(),
        })
    }
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    if code.contains(['/', '\\']) || code.starts_with('.') {
        return Err(DataError::InvalidSymbol(code.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("straits-snapshot-{name}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_fetch_snapshot() {
        let root = temp_root("fetch");
        fs::write(
            root.join("4863.KL.json"),
            r#"{"info": {"longName": "Telekom Malaysia Berhad", "currency": "MYR"},
                "balance_sheet": null,
                "financials": {"columns": ["2023-12-31"], "index": ["Total Revenue"], "data": [[1.2e10]]}}"#,
        )
        .unwrap();

        let source = SnapshotSource::new(&root);
        let record = source.fetch("4863.KL").unwrap();
        assert_eq!(record.info.text("currency"), Some("MYR"));
        assert!(record.balance_sheet.is_none());
        assert_eq!(
            record
                .financials
                .as_ref()
                .and_then(|t| t.value("Total Revenue", "2023-12-31")),
            Some(1.2e10)
        );

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_missing_snapshot() {
        let source = SnapshotSource::new(temp_root("missing"));
        let result = source.fetch("NOPE.SI");
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[test]
    fn test_empty_info_is_missing() {
        let root = temp_root("empty-info");
        fs::write(root.join("D05.SI.json"), r#"{"info": {}}"#).unwrap();

        let result = SnapshotSource::new(&root).fetch("D05.SI");
        assert!(matches!(result, Err(DataError::MissingData { .. })));

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_invalid_symbol() {
        let source = SnapshotSource::new(temp_root("invalid"));
        assert!(matches!(source.fetch(""), Err(DataError::InvalidSymbol(_))));
        assert!(matches!(
            source.fetch("../etc/passwd"),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_memory_source() {
        let mut source = BTreeMap::new();
        source.insert("D05.SI".to_string(), RawRecord::default());

        assert!(source.fetch("D05.SI").is_ok());
        assert!(source.fetch("O39.SI").is_err());
    }
}
