//! The `extract` run: snapshots to an exported table.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use straits::pipeline::{Pipeline, PipelineConfig, PipelineReport, fill_exchange_rates};
use straits_data::SnapshotSource;
use straits_data::yahoo::{ExchangeRateProvider, FxConfig};
use straits_extract::{CanonicalRecord, Extractor, LineItemMap};
use straits_output::{ExportError, ExportFormat, Exporter, Scale, format_for_export};
use straits_segments::{GeminiClient, SegmentConfig, SegmentError, enrich_segments};

/// Error type for an extract run.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ExtractionError {
    /// Ticker list or exchange rate setup failed.
    #[error("Data error: {0}")]
    Data(#[from] straits_data::DataError),
    /// Segment client could not be built.
    #[error("Segment error: {0}")]
    Segments(#[from] SegmentError),
    /// Table could not be built or written.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    /// Line-item override file unreadable.
    #[error("Line-item map {path}: {reason}")]
    LineItems {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// Nothing to extract.
    #[error("No tickers selected")]
    NoTickers,
}

/// Options for one extract run.
#[derive(Debug, Clone)]
pub(crate) struct ExtractOptions {
    /// Directory of `<code>.json` snapshots.
    pub(crate) snapshots: PathBuf,
    /// Sector names to keep; empty keeps all.
    pub(crate) sectors: Vec<String>,
    /// Unit for monetary columns.
    pub(crate) scale: Scale,
    /// Destination file; stdout when absent.
    pub(crate) output: Option<PathBuf>,
    /// Output format.
    pub(crate) format: ExportFormat,
    /// Write canonical records instead of the formatted table.
    pub(crate) records: bool,
    /// JSON file of line-item chains overriding the defaults.
    pub(crate) line_items: Option<PathBuf>,
    /// Look up exchange rates.
    pub(crate) fx: bool,
    /// Ask the segment service for business segments.
    pub(crate) segments: bool,
}

/// Read a line-item map and lay it over the default chains.
pub(crate) fn load_line_items(path: &Path) -> Result<LineItemMap, ExtractionError> {
    let failed = |reason: String| ExtractionError::LineItems {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let overrides: LineItemMap =
        serde_json::from_str(&content).map_err(|e| failed(e.to_string()))?;
    Ok(LineItemMap::default().overlay(overrides))
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style.progress_chars("=>-"));
    pb
}

/// Run extraction over `codes` and write the result.
pub(crate) async fn run_extraction(
    codes: &[String],
    options: &ExtractOptions,
) -> Result<PipelineReport, ExtractionError> {
    if codes.is_empty() {
        return Err(ExtractionError::NoTickers);
    }

    let line_items = match &options.line_items {
        Some(path) => load_line_items(path)?,
        None => LineItemMap::default(),
    };

    let pipeline = Pipeline::new(
        SnapshotSource::new(options.snapshots.clone()),
        Extractor::new(line_items),
        PipelineConfig {
            sectors: options.sectors.clone(),
        },
    );

    let pb = progress_bar(codes.len());
    let mut report = pipeline.run(codes, Some(&pb));
    pb.finish_with_message(format!(
        "{} extracted, {} filtered, {} failed",
        report.records.len(),
        report.filtered.len(),
        report.failed.len()
    ));

    if options.fx {
        let mut provider = ExchangeRateProvider::new(FxConfig::default())?;
        fill_exchange_rates(&mut report.records, &mut provider).await;
    }

    if options.segments {
        report.records = add_segments(std::mem::take(&mut report.records)).await?;
    }

    write_output(&report.records, options)?;
    Ok(report)
}

async fn add_segments(
    records: Vec<CanonicalRecord>,
) -> Result<Vec<CanonicalRecord>, ExtractionError> {
    let config = SegmentConfig::from_env();
    if !config.is_enabled() {
        tracing::warn!("segment lookup requested but no API key is set; skipping");
        return Ok(records);
    }

    let client = GeminiClient::new(&config)?;
    tracing::info!(model = client.model(), "requesting business segments");
    Ok(enrich_segments(records, &client, &config).await)
}

fn write_output(
    records: &[CanonicalRecord],
    options: &ExtractOptions,
) -> Result<(), ExtractionError> {
    let content = if options.records {
        records.to_vec().export_to_string(options.format)?
    } else {
        format_for_export(records, options.scale)?.export_to_string(options.format)?
    };

    match &options.output {
        Some(path) => {
            fs::write(path, content).map_err(ExportError::from)?;
            tracing::info!(path = %path.display(), rows = records.len(), "export written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
