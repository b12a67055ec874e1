use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use spendlens_core::{date_bounds, DateRange, Granularity, Month};
use spendlens_import::{import, PipelineConfig, SourceFile};

mod report;

#[derive(Parser, Debug)]
#[command(name = "spendlens", version, about = "Unified spending report from bank CSV exports")]
struct Cli {
    /// CSV exports (Chase, Capital One)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML file overriding detector, column mappings, noise phrases or categories
    #[arg(long)]
    config: Option<PathBuf>,

    /// Month to summarize (YYYY-MM); defaults to the newest month with data
    #[arg(long)]
    month: Option<Month>,

    /// Start of the time-series and transaction range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the time-series and transaction range (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Time-series bucket size: month or day
    #[arg(long, default_value = "month")]
    granularity: Granularity,

    /// Only list transactions in this grouped category
    #[arg(long)]
    category: Option<String>,

    /// Print the transaction table as well
    #[arg(long)]
    list: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let pipeline = import::create_pipeline(config);

    let mut files = Vec::with_capacity(cli.files.len());
    let mut unreadable = Vec::new();
    for path in &cli.files {
        // Unreadable files are skipped like unrecognised ones.
        match read_source(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                let name = path.display().to_string();
                tracing::warn!(file = %name, "Skipping file: {e:#}");
                unreadable.push(format!("{name}: {e:#}"));
            }
        }
    }

    let ingest = pipeline.run(files);
    let transactions = &ingest.transactions;

    let range = match (cli.from, cli.to, date_bounds(transactions)) {
        (Some(start), Some(end), _) => Some(DateRange::new(start, end)),
        (start, end, Some(bounds)) => Some(DateRange::new(
            start.unwrap_or(bounds.start),
            end.unwrap_or(bounds.end),
        )),
        (_, _, None) => None,
    };

    let report = report::Report::build(
        &ingest,
        report::Options {
            month: cli.month,
            range,
            granularity: cli.granularity,
            category: cli.category,
            include_transactions: cli.list || cli.json,
            unreadable,
        },
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let name = path.display().to_string();
    let file = File::open(path).with_context(|| format!("opening {name}"))?;
    import::read_csv(&name, file).with_context(|| format!("reading {name}"))
}
