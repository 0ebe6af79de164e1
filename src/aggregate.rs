//! Summary views over the cleaned observation table.

use crate::error::PlantHarmError;
use crate::types::columns::{HARM_VALUE, OBSERVATION_DATE, PLANT_NAME, TOTAL_HARM, YEAR};
use polars::prelude::*;

fn require_columns(df: &DataFrame, names: &[&str]) -> Result<(), PlantHarmError> {
    for name in names {
        df.column(name)
            .map_err(|e| PlantHarmError::ColumnNotFound(name.to_string(), e))?;
    }
    Ok(())
}

/// Ranks plants by their summed harm value.
///
/// Returns a frame with `plant_name` and `total_harm` columns holding at most
/// `n` rows, sorted by `total_harm` descending. Plants with equal totals are
/// ordered alphabetically. `n == 0` or an empty input yields an empty view.
///
/// # Errors
///
/// [`PlantHarmError::ColumnNotFound`] when `plant_name` or `harm_value` is
/// missing, i.e. the input was not produced by [`crate::clean`].
pub fn top_plants(observations: &DataFrame, n: usize) -> Result<DataFrame, PlantHarmError> {
    require_columns(observations, &[PLANT_NAME, HARM_VALUE])?;
    let limit = IdxSize::try_from(n).unwrap_or(IdxSize::MAX);

    let view = observations
        .clone()
        .lazy()
        .group_by([col(PLANT_NAME)])
        .agg([col(HARM_VALUE).sum().alias(TOTAL_HARM)])
        .sort(
            [TOTAL_HARM, PLANT_NAME],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(limit)
        .collect()?;
    Ok(view)
}

/// Sums harm values per calendar year of observation.
///
/// Returns a frame with `year` (`i32`) and `total_harm` columns, one row per
/// year present, in ascending year order.
pub fn yearly_trend(observations: &DataFrame) -> Result<DataFrame, PlantHarmError> {
    require_columns(observations, &[OBSERVATION_DATE, HARM_VALUE])?;

    let view = observations
        .clone()
        .lazy()
        .select([
            col(OBSERVATION_DATE).dt().year().alias(YEAR),
            col(HARM_VALUE),
        ])
        .group_by([col(YEAR)])
        .agg([col(HARM_VALUE).sum().alias(TOTAL_HARM)])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;
    Ok(view)
}
