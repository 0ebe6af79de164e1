//! Typed rows of the two summary views.

use crate::error::PlantHarmError;
use crate::types::columns::{PLANT_NAME, TOTAL_HARM, YEAR};
use polars::prelude::*;
use serde::Serialize;

/// One row of the top-plants view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantHarm {
    pub plant_name: String,
    pub total_harm: f64,
}

/// One row of the yearly-trend view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearHarm {
    pub year: i32,
    pub total_harm: f64,
}

/// Retrieves a column by name from a DataFrame.
fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, PlantHarmError> {
    df.column(name)
        .map_err(|e| PlantHarmError::ColumnNotFound(name.to_string(), e))
}

impl PlantHarm {
    /// Reads the rows of a frame produced by [`crate::top_plants`], in order.
    pub fn from_view(view: &DataFrame) -> Result<Vec<Self>, PlantHarmError> {
        let names = get_column(view, PLANT_NAME)?.str()?;
        let totals = get_column(view, TOTAL_HARM)?.f64()?;

        Ok(names
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(name, total)| {
                Some(PlantHarm {
                    plant_name: name?.to_string(),
                    total_harm: total?,
                })
            })
            .collect())
    }
}

impl YearHarm {
    /// Reads the rows of a frame produced by [`crate::yearly_trend`], in order.
    pub fn from_view(view: &DataFrame) -> Result<Vec<Self>, PlantHarmError> {
        let years = get_column(view, YEAR)?.i32()?;
        let totals = get_column(view, TOTAL_HARM)?.f64()?;

        Ok(years
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(year, total)| {
                Some(YearHarm {
                    year: year?,
                    total_harm: total?,
                })
            })
            .collect())
    }
}
