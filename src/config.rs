use crate::fetch::fetcher::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT};
use crate::render::theme::ChartTheme;
use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_PREVIEW_COUNT: usize = 10;

/// Settings for one run of the pipeline.
///
/// Every field has a default, so `PipelineConfig::builder().build()` reproduces
/// the stock run: fetch the portal dataset, preview 10 rows, rank the top 5
/// plants and open both charts in the browser.
///
/// ```
/// use plant_harm::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .top_n(3)
///     .output_dir("charts")
///     .build();
/// assert_eq!(config.raw_preview_count, 10);
/// assert!(config.date_day_first);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PipelineConfig {
    #[builder(into, default = DEFAULT_SOURCE_URL.to_string())]
    pub source_url: String,

    #[builder(default = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Number of cleaned rows printed before the summaries.
    #[builder(default = DEFAULT_PREVIEW_COUNT)]
    pub raw_preview_count: usize,

    #[builder(default = true)]
    pub date_day_first: bool,

    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// Write charts here as HTML instead of opening them.
    #[builder(into)]
    pub output_dir: Option<PathBuf>,

    #[builder(default)]
    pub skip_charts: bool,

    #[builder(default)]
    pub theme: ChartTheme,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
