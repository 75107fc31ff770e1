use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sales_clean::pipeline::{clean_file, PipelineOptions, TracingObserver};

#[derive(Parser)]
#[command(name = "sales-clean")]
#[command(about = "Clean a raw sales transaction CSV and add revenue")]
#[command(version)]
struct Cli {
    /// Raw CSV to clean
    #[arg(short, long, default_value = "data/raw/sales_data_raw.csv")]
    input: PathBuf,

    /// Where the cleaned CSV is written (the directory must exist)
    #[arg(short, long, default_value = "data/processed/sales_data_clean.csv")]
    output: PathBuf,

    /// Rows shown in the preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// Also write the run report as JSON to this path
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = PipelineOptions {
        preview_rows: cli.preview_rows,
        observer: Some(Arc::new(TracingObserver)),
    };

    info!("starting data cleaning pipeline");
    let report = clean_file(&cli.input, &cli.output, &options).with_context(|| {
        format!(
            "cleaning {} -> {} failed",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    println!("{report}");

    if let Some(path) = &cli.report_json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}
