//! Sequential fetch and extract over a ticker list.

use indicatif::ProgressBar;
use straits_data::universe::matches_sector;
use straits_data::yahoo::ExchangeRateProvider;
use straits_data::{RecordSource, Result};
use straits_extract::{CanonicalRecord, Extractor};

/// Options for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Keep only companies whose sector contains one of these; empty keeps all
    pub sectors: Vec<String>,
}

/// Outcome of processing one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Record extracted
    Extracted(Box<CanonicalRecord>),
    /// Sector did not match the filter
    Filtered,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// Extracted records, in ticker order
    pub records: Vec<CanonicalRecord>,
    /// Tickers dropped by the sector filter
    pub filtered: Vec<String>,
    /// Tickers whose snapshot could not be read, with the reason
    pub failed: Vec<(String, String)>,
}

/// Fetches raw records from a source and extracts them one ticker at a time.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    extractor: Extractor,
    config: PipelineConfig,
}

impl<S: RecordSource> Pipeline<S> {
    /// Create a pipeline over `source`.
    pub const fn new(source: S, extractor: Extractor, config: PipelineConfig) -> Self {
        Self {
            source,
            extractor,
            config,
        }
    }

    /// The record source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, filter and extract a single ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot supply the raw record.
    pub fn process(&self, code: &str) -> Result<Outcome> {
        let raw = self.source.fetch(code)?;

        if !matches_sector(&raw.info, &self.config.sectors) {
            tracing::debug!(%code, sector = ?raw.info.text("sector"), "filtered by sector");
            return Ok(Outcome::Filtered);
        }

        Ok(Outcome::Extracted(Box::new(self.extractor.extract(code, &raw))))
    }

    /// Process every code in order. Failures are logged and skipped.
    pub fn run(&self, codes: &[String], progress: Option<&ProgressBar>) -> PipelineReport {
        let mut report = PipelineReport::default();

        for code in codes {
            if let Some(pb) = progress {
                pb.set_message(code.clone());
            }

            match self.process(code) {
                Ok(Outcome::Extracted(record)) => report.records.push(*record),
                Ok(Outcome::Filtered) => report.filtered.push(code.clone()),
                Err(e) => {
                    tracing::warn!(%code, error = %e, "ticker skipped");
                    report.failed.push((code.clone(), e.to_string()));
                }
            }

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        tracing::info!(
            extracted = report.records.len(),
            filtered = report.filtered.len(),
            failed = report.failed.len(),
            "pipeline finished"
        );
        report
    }
}

/// Fill `exchange_rate` on every record from its currency.
///
/// Lookups that fail leave the rate as `None`.
pub async fn fill_exchange_rates(
    records: &mut [CanonicalRecord],
    provider: &mut ExchangeRateProvider,
) {
    for record in records {
        record.exchange_rate = provider.rate_for(&record.currency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::BTreeMap;
    use straits_data::RawRecord;
    use straits_data::yahoo::FxConfig;

    fn source() -> BTreeMap<String, RawRecord> {
        let raw = |info: serde_json::Value| -> RawRecord {
            serde_json::from_value(json!({ "info": info })).unwrap()
        };
        BTreeMap::from([
            (
                "0012.KL".to_string(),
                raw(json!({"longName": "Three-A", "sector": "Consumer Defensive"})),
            ),
            (
                "D05.SI".to_string(),
                raw(json!({"longName": "DBS", "sector": "Financial Services"})),
            ),
        ])
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_run_skips_failures() {
        let pipeline = Pipeline::new(source(), Extractor::default(), PipelineConfig::default());
        let report = pipeline.run(&codes(&["0012.KL", "MISSING.SI", "D05.SI"]), None);

        let extracted: Vec<&str> = report.records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(extracted, vec!["0012.KL", "D05.SI"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "MISSING.SI");
        assert!(report.filtered.is_empty());
    }

    #[rstest]
    #[case(&[], "D05.SI", Some(false))]
    #[case(&["consumer"], "D05.SI", Some(true))]
    #[case(&["FINANCIAL"], "D05.SI", Some(false))]
    #[case(&[], "NOPE.KL", None)]
    fn test_process_outcome(
        #[case] sectors: &[&str],
        #[case] code: &str,
        #[case] filtered: Option<bool>,
    ) {
        let config = PipelineConfig {
            sectors: codes(sectors),
        };
        let pipeline = Pipeline::new(source(), Extractor::default(), config);

        match (pipeline.process(code), filtered) {
            (Ok(Outcome::Filtered), Some(true)) => {}
            (Ok(Outcome::Extracted(record)), Some(false)) => assert_eq!(record.code, code),
            (Err(_), None) => {}
            (other, expected) => panic!("unexpected {other:?} for {expected:?}"),
        }
    }

    #[test]
    fn test_sector_filter() {
        let config = PipelineConfig {
            sectors: vec!["financial".to_string()],
        };
        let pipeline = Pipeline::new(source(), Extractor::default(), config);
        let report = pipeline.run(&codes(&["0012.KL", "D05.SI"]), None);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "DBS");
        assert_eq!(report.filtered, vec!["0012.KL"]);
    }

    #[test]
    fn test_progress_advances_per_ticker() {
        let pipeline = Pipeline::new(source(), Extractor::default(), PipelineConfig::default());
        let pb = ProgressBar::hidden();
        pb.set_length(3);

        let _ = pipeline.run(&codes(&["0012.KL", "MISSING.SI", "D05.SI"]), Some(&pb));
        assert_eq!(pb.position(), 3);
    }

    #[tokio::test]
    async fn test_exchange_rates_without_lookup() {
        let mut sgd = CanonicalRecord::empty("D05.SI");
        sgd.currency = "SGD".to_string();
        let unknown = CanonicalRecord::empty("X.SI");
        let mut records = vec![sgd, unknown];

        let mut provider = ExchangeRateProvider::new(FxConfig::default()).unwrap();
        fill_exchange_rates(&mut records, &mut provider).await;

        assert_eq!(records[0].exchange_rate, Some(1.0));
        assert_eq!(records[1].exchange_rate, None);
    }
}
