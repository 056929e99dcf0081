//! Straits CLI binary.
//!
//! Extracts canonical company records from provider snapshots and exports
//! them as a formatted table.

mod integration;

use clap::{Parser, Subcommand};
use integration::codes::{collect_codes, parse_exchanges};
use integration::extraction::{ExtractOptions, run_extraction};
use std::path::PathBuf;
use std::process;
use straits_data::Exchange;
use straits_output::{ExportFormat, Scale};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "straits")]
#[command(about = "Straits: ASEAN company fundamentals extraction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from snapshots and export them
    Extract {
        /// Ticker codes, e.g. 0012.KL D05.SI
        codes: Vec<String>,

        /// Header-less CSV whose first column holds ticker codes
        #[arg(long)]
        tickers: Option<PathBuf>,

        /// Directory of <code>.json snapshots
        #[arg(long, default_value = "snapshots")]
        snapshots: PathBuf,

        /// Country codes to keep (SG, MY, ID, TH, PH, VN)
        #[arg(long, value_delimiter = ',')]
        country: Vec<String>,

        /// Sector names to keep, matched case-insensitively
        #[arg(long, value_delimiter = ',')]
        sector: Vec<String>,

        /// Unit for monetary columns (thousands or millions)
        #[arg(long, default_value = "thousands")]
        scale: Scale,

        /// Output file; prints to stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format (csv, json, pretty-json); defaults from the output extension
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Export canonical records instead of the formatted table
        #[arg(long)]
        records: bool,

        /// JSON file of line-item chains overriding the defaults
        #[arg(long)]
        line_items: Option<PathBuf>,

        /// Look up exchange rates to SGD
        #[arg(long)]
        fx: bool,

        /// Ask the AI service for business segments (needs GEMINI_API_KEY)
        #[arg(long)]
        segments: bool,
    },

    /// List ticker codes from a ticker file
    Tickers {
        /// Header-less CSV whose first column holds ticker codes
        file: PathBuf,

        /// Country codes to keep
        #[arg(long, value_delimiter = ',')]
        country: Vec<String>,
    },

    /// List supported exchanges
    Markets,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("straits=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            codes,
            tickers,
            snapshots,
            country,
            sector,
            scale,
            output,
            format,
            records,
            line_items,
            fx,
            segments,
        } => {
            let exchanges = parse_exchanges(&country)?;
            let codes = collect_codes(&codes, tickers.as_deref(), &exchanges)?;

            let format = format
                .or_else(|| output.as_deref().and_then(ExportFormat::from_path))
                .unwrap_or(ExportFormat::Csv);

            let options = ExtractOptions {
                snapshots,
                sectors: sector,
                scale,
                output,
                format,
                records,
                line_items,
                fx,
                segments,
            };

            let report = run_extraction(&codes, &options).await?;
            for (code, reason) in &report.failed {
                eprintln!("  skipped {code}: {reason}");
            }
        }
        Commands::Tickers { file, country } => {
            let exchanges = parse_exchanges(&country)?;
            let codes = collect_codes(&[], Some(&file), &exchanges)?;
            for code in &codes {
                println!("{code}");
            }
            eprintln!("{} tickers", codes.len());
        }
        Commands::Markets => list_markets(),
    }

    Ok(())
}

fn list_markets() {
    println!("Exchanges:");
    println!("==========\n");

    for exchange in Exchange::all() {
        println!(
            "{} {:4} {}",
            exchange.country_code(),
            exchange.suffix(),
            exchange.name()
        );
    }
}
