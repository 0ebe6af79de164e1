use crate::fetch::error::FetchError;
use crate::render::error::RenderError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlantHarmError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' cannot be renamed to '{target}': target already exists")]
    RenameConflict { column: String, target: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
