//! Fetch, clean and summarise the Lithuanian plant disease and pest harm
//! assessment dataset published on the open data portal.
//!
//! The pipeline is linear: [`Fetcher`] downloads the raw records, [`clean`]
//! normalises them into the observation table, [`top_plants`] and
//! [`yearly_trend`] summarise it, and [`ChartRenderer`] draws the two charts.
//! [`Pipeline`] runs all of it in order.

mod aggregate;
mod cleaning;
mod config;
mod error;
mod fetch;
mod pipeline;
mod render;
mod types;

pub use error::PlantHarmError;
pub use fetch::error::FetchError;
pub use render::error::RenderError;

pub use aggregate::{top_plants, yearly_trend};
pub use cleaning::dates::parse_observation_date;
pub use cleaning::{clean, preview, CleanOptions};
pub use config::{PipelineConfig, DEFAULT_PREVIEW_COUNT, DEFAULT_TOP_N};
pub use fetch::fetcher::{Fetcher, DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT};
pub use fetch::records::{records_to_frame, DATA_ENVELOPE_KEY};
pub use pipeline::{Pipeline, PipelineReport};
pub use render::charts::{ChartOutput, ChartRenderer, TOP_PLANTS_TITLE, YEARLY_TREND_TITLE};
pub use render::theme::{ChartColor, ChartTheme};

pub use types::columns;
pub use types::views::{PlantHarm, YearHarm};
