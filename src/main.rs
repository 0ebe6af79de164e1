//! Command line entry point: fetch the harm dataset, print the summaries and
//! draw the charts.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use plant_harm::{
    Pipeline, PipelineConfig, DEFAULT_PREVIEW_COUNT, DEFAULT_SOURCE_URL, DEFAULT_TOP_N,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "plant_harm")]
#[command(about = "Summarise plant disease and pest harm observations", long_about = None)]
struct Cli {
    /// Dataset endpoint returning the observation records as JSON
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// Number of plants in the ranking
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Number of cleaned rows to print
    #[arg(long, default_value_t = DEFAULT_PREVIEW_COUNT)]
    preview: usize,

    /// Read ambiguous dates as month/day/year instead of day/month/year
    #[arg(long)]
    month_first: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Write charts as HTML files into this directory instead of opening them
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    // polars reads its table formatting only from the environment; set it once
    // here, before any frame is printed, so whole previews are shown
    let shown_rows = cli.preview.max(cli.top_n);
    std::env::set_var("POLARS_FMT_MAX_ROWS", shown_rows.to_string());

    let config = PipelineConfig::builder()
        .source_url(cli.source_url)
        .top_n(cli.top_n)
        .raw_preview_count(cli.preview)
        .date_day_first(!cli.month_first)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .maybe_output_dir(cli.output_dir)
        .skip_charts(cli.no_charts)
        .build();

    let pipeline = Pipeline::new(config).context("Failed to set up the pipeline")?;
    pipeline.run().context("Pipeline run failed")?;
    Ok(())
}
