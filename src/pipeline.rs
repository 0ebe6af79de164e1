//! Sequences fetch → clean → aggregate → render and prints each stage.

use crate::aggregate::{top_plants, yearly_trend};
use crate::cleaning::{clean, preview, CleanOptions};
use crate::config::PipelineConfig;
use crate::error::PlantHarmError;
use crate::fetch::fetcher::Fetcher;
use crate::render::charts::{ChartOutput, ChartRenderer};
use crate::types::views::{PlantHarm, YearHarm};
use log::info;
use polars::frame::DataFrame;
use std::path::PathBuf;

/// Everything a run produced, for callers that want more than the console output.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Column names of the raw table, before renaming.
    pub raw_columns: Vec<String>,
    pub cleaned: DataFrame,
    pub top_plants: DataFrame,
    pub yearly_trend: DataFrame,
    /// Chart files written, empty when charts were shown or skipped.
    pub chart_files: Vec<PathBuf>,
}

pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Fetcher,
    renderer: Option<ChartRenderer>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PlantHarmError> {
        let fetcher = Fetcher::builder()
            .source_url(config.source_url.clone())
            .timeout(config.timeout)
            .build()?;

        let renderer = (!config.skip_charts).then(|| {
            let output = match &config.output_dir {
                Some(dir) => ChartOutput::Directory(dir.clone()),
                None => ChartOutput::Show,
            };
            ChartRenderer::new(config.theme.clone(), output)
        });

        Ok(Self {
            config,
            fetcher,
            renderer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetches the dataset and processes it. A failed fetch is reported on the
    /// console and processed as an empty table.
    pub fn run(&self) -> Result<PipelineReport, PlantHarmError> {
        let raw = self.fetcher.fetch();
        self.process(raw)
    }

    /// Runs every stage after the fetch on an already loaded raw table.
    pub fn process(&self, raw: DataFrame) -> Result<PipelineReport, PlantHarmError> {
        let raw_columns: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        println!("Columns from API: {:?}", raw_columns);

        let options = CleanOptions {
            day_first: self.config.date_day_first,
        };
        let cleaned = clean(raw, &options)?;

        println!("First {} Records:", self.config.raw_preview_count);
        println!("{}", preview(&cleaned, self.config.raw_preview_count));

        let mut chart_files = Vec::new();

        println!("\nTop {} Plants:", self.config.top_n);
        let top = top_plants(&cleaned, self.config.top_n)?;
        println!("{}", top);
        if let Some(renderer) = &self.renderer {
            chart_files.extend(renderer.render_top_plants(&PlantHarm::from_view(&top)?)?);
        }

        println!("\nYearly Trend:");
        let trend = yearly_trend(&cleaned)?;
        println!("{}", trend);
        if let Some(renderer) = &self.renderer {
            chart_files.extend(renderer.render_yearly_trend(&YearHarm::from_view(&trend)?)?);
        }

        info!(
            "Pipeline finished: {} observations, {} plants ranked, {} years",
            cleaned.height(),
            top.height(),
            trend.height()
        );

        Ok(PipelineReport {
            raw_columns,
            cleaned,
            top_plants: top,
            yearly_trend: trend,
            chart_files,
        })
    }
}
