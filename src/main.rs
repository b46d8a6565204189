use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use order_press::config::Config;
use order_press::domain::SkuMetadata;
use order_press::error::Result;
use order_press::ingest::{self, IngestOutcome};
use order_press::logging;
use order_press::metadata::load_sku_metadata;
use order_press::pipeline;
use order_press::report::ReportWriter;

#[derive(Parser)]
#[command(name = "order-press")]
#[command(about = "Consolidate order-line CSV exports into printer-ready size reports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the report tables
    Process {
        /// Directory containing input CSV files
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Directory for output files
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Specific CSV files to process instead of scanning the input directory
        #[arg(long, num_args = 1..)]
        files: Option<Vec<PathBuf>>,
        /// Prefix for output filenames
        #[arg(long)]
        output_prefix: Option<String>,
        /// SKU metadata CSV (SKU, Description, Ink Color)
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
    /// Validate the inputs and print a review summary without writing reports
    Check {
        /// Directory containing input CSV files
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Specific CSV files to check instead of scanning the input directory
        #[arg(long, num_args = 1..)]
        files: Option<Vec<PathBuf>>,
    },
}

fn gather_sources(
    config: &Config,
    input_dir: Option<PathBuf>,
    files: Option<Vec<PathBuf>>,
) -> Result<IngestOutcome> {
    let paths = match files {
        Some(files) => files,
        None => {
            let dir = input_dir.unwrap_or_else(|| config.io.input_dir.clone());
            ingest::discover_csv_files(&dir)?
        }
    };
    ingest::read_sources(&paths)
}

fn report_skipped(outcome: &IngestOutcome) {
    if outcome.skipped.is_empty() {
        return;
    }
    warn!(files = outcome.skipped.len(), "some input files were skipped");
    println!("\n⚠️  Skipped input files:");
    for skipped in &outcome.skipped {
        println!("   - {}: {}", skipped.path.display(), skipped.error);
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Process {
            input_dir,
            output_dir,
            files,
            output_prefix,
            metadata,
        } => {
            println!("🔄 Processing order exports...");

            let outcome = gather_sources(&config, input_dir, files)?;
            report_skipped(&outcome);

            let metadata_path = metadata.or_else(|| config.io.metadata.clone());
            let sku_metadata: HashMap<String, SkuMetadata> = match metadata_path {
                Some(path) => load_sku_metadata(&path)?,
                None => HashMap::new(),
            };

            let rows = outcome.combined_rows();
            let run = pipeline::run(&rows, &sku_metadata, config.report.include_unresolved)?;

            let writer = ReportWriter::new(
                &output_dir.unwrap_or_else(|| config.io.output_dir.clone()),
                output_prefix
                    .as_deref()
                    .unwrap_or(&config.io.output_prefix),
                config.report.include_unresolved,
            );
            let reports = writer.write_all(&run)?;

            println!("\n📊 Order processing complete:");
            println!("   Input rows: {}", run.validated.len());
            println!("   OK: {}, needs review: {}", run.ok_count(), run.review_count());
            println!("   Unique SKU-Size combinations: {}", run.aggregated.len());
            println!("   SKUs ready for printing: {}", run.final_rows.len());
            println!("   Final output: {}", reports.final_table.display());
        }
        Commands::Check { input_dir, files } => {
            println!("🔎 Checking order exports...");

            let outcome = gather_sources(&config, input_dir, files)?;
            report_skipped(&outcome);

            let rows = outcome.combined_rows();
            let run = pipeline::run(&rows, &HashMap::new(), config.report.include_unresolved)?;

            println!("\n📊 Validation summary:");
            println!("   Input rows: {}", run.validated.len());
            println!("   OK: {}, needs review: {}", run.ok_count(), run.review_count());
            if run.review_count() > 0 {
                println!("\n⚠️  Rows needing review:");
                for record in run
                    .validated
                    .iter()
                    .filter(|r| r.status == order_press::domain::ValidationStatus::Review)
                {
                    println!(
                        "   - style '{}' size '{}' quantity {}",
                        record.original_vendor_style, record.original_size, record.quantity
                    );
                }
            }
        }
    }

    Ok(())
}
