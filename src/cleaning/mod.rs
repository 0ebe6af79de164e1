//! Turns the raw portal table into the cleaned observation table.
//!
//! Cleaning renames the Lithuanian source columns, coerces the observation date
//! and harm value, and drops rows that miss a plant name, harm value or date.

pub mod dates;

use crate::cleaning::dates::parse_observation_date;
use crate::error::PlantHarmError;
use crate::types::columns::{HARM_VALUE, OBSERVATION_DATE, PLANT_NAME, SOURCE_COLUMN_RENAMES};
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;

/// Options controlling type coercion during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Read ambiguous numeric dates as day/month/year.
    pub day_first: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self { day_first: true }
    }
}

/// Cleans a raw observation table.
///
/// Steps, in order:
/// 1. source columns are renamed to their semantic names (unknown columns pass through),
/// 2. `observation_date` is parsed into a `Date` column, unparseable values become null,
/// 3. `harm_value` is parsed into an `f64` column, non-numeric values become null,
/// 4. rows with a null or blank `plant_name` or a null `harm_value` are dropped,
/// 5. rows with a null `observation_date` are dropped.
///
/// Surviving rows keep their input order. The input frame is consumed. An empty
/// input, including one with no columns at all, yields an empty table that
/// still carries the three required columns.
///
/// # Errors
///
/// Returns [`PlantHarmError::RenameConflict`] when a source column would be renamed
/// onto a column that already exists, and [`PlantHarmError::DataFrameProcessing`]
/// if a Polars operation fails.
///
/// # Example
///
/// ```
/// use plant_harm::{clean, CleanOptions};
/// use polars::prelude::*;
///
/// let raw = df!(
///     "augalo_pavadinimas" => [Some("Wheat"), Some("Corn")],
///     "zalingumo_ivertis" => [Some("10"), Some("abc")],
///     "stebejimo_data" => [Some("01/02/2023"), Some("01/01/2023")],
/// )?;
///
/// let cleaned = clean(raw, &CleanOptions::default())?;
/// assert_eq!(cleaned.height(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn clean(raw: DataFrame, options: &CleanOptions) -> Result<DataFrame, PlantHarmError> {
    let input_rows = raw.height();
    let mut df = rename_source_columns(raw)?;
    ensure_required_columns(&mut df)?;

    let dates = coerce_observation_dates(df.column(OBSERVATION_DATE)?, options.day_first)?;
    df.with_column(dates)?;
    let harm = coerce_harm_values(df.column(HARM_VALUE)?)?;
    df.with_column(harm)?;
    let plants = df.column(PLANT_NAME)?.cast(&DataType::String)?;
    df.with_column(plants)?;

    let mask = required_fields_mask(&df)?;
    let df = df.filter(&mask)?;
    let with_required_fields = df.height();

    let df = df
        .lazy()
        .filter(col(OBSERVATION_DATE).is_not_null())
        .collect()?;

    info!(
        "Cleaned {} raw rows into {} observations ({} missing plant or harm value, {} missing date)",
        input_rows,
        df.height(),
        input_rows - with_required_fields,
        with_required_fields - df.height()
    );
    Ok(df)
}

/// Returns the first `n` rows of a table.
pub fn preview(df: &DataFrame, n: usize) -> DataFrame {
    df.head(Some(n))
}

fn rename_source_columns(mut df: DataFrame) -> Result<DataFrame, PlantHarmError> {
    for (source, target) in SOURCE_COLUMN_RENAMES {
        if df.get_column_index(source).is_none() {
            continue;
        }
        if df.get_column_index(target).is_some() {
            return Err(PlantHarmError::RenameConflict {
                column: source.to_string(),
                target: target.to_string(),
            });
        }
        df.rename(source, target.into())?;
        debug!("Renamed column '{}' to '{}'", source, target);
    }
    Ok(df)
}

/// Adds all-null columns for required fields the source did not provide, so
/// the filters below drop those rows instead of failing.
fn ensure_required_columns(df: &mut DataFrame) -> PolarsResult<()> {
    let height = df.height();
    let required = [
        (OBSERVATION_DATE, DataType::String),
        (PLANT_NAME, DataType::String),
        (HARM_VALUE, DataType::Float64),
    ];
    for (name, dtype) in required {
        if df.get_column_index(name).is_none() {
            debug!("Column '{}' missing from source, adding as null", name);
            df.with_column(Series::full_null(name.into(), height, &dtype))?;
        }
    }
    Ok(())
}

fn coerce_observation_dates(column: &Column, day_first: bool) -> PolarsResult<Column> {
    match column.dtype() {
        DataType::Date => Ok(column.clone()),
        DataType::Datetime(_, _) => column.cast(&DataType::Date),
        _ => {
            let text = column.cast(&DataType::String)?;
            let dates: Vec<Option<NaiveDate>> = text
                .str()?
                .into_iter()
                .map(|value| value.and_then(|s| parse_observation_date(s, day_first)))
                .collect();
            Ok(Series::new(OBSERVATION_DATE.into(), dates).into())
        }
    }
}

fn parse_harm_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn coerce_harm_values(column: &Column) -> PolarsResult<Column> {
    let parsed: Float64Chunked = if column.dtype() == &DataType::String {
        column
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_harm_value))
            .collect()
    } else {
        // Numeric sources only need widening; NaN counts as missing
        let widened = column.cast(&DataType::Float64)?;
        let values: Float64Chunked = widened
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        values
    };
    Ok(parsed.with_name(HARM_VALUE.into()).into_series().into())
}

fn required_fields_mask(df: &DataFrame) -> PolarsResult<BooleanChunked> {
    let plants = df.column(PLANT_NAME)?.str()?;
    let harm = df.column(HARM_VALUE)?.f64()?;
    Ok(plants
        .into_iter()
        .zip(harm.into_iter())
        .map(|(plant, harm)| plant.is_some_and(|p| !p.trim().is_empty()) && harm.is_some())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::columns::{MUNICIPALITY, VDA_ID};

    fn raw_frame() -> DataFrame {
        df!(
            "_id" => ["a", "b", "c", "d", "e"],
            "augalo_pavadinimas" => [Some("Wheat"), Some("Wheat"), Some("Corn"), None, Some("  ")],
            "zalingumo_ivertis" => [Some("10"), Some(" 5 "), Some("abc"), Some("3"), Some("2")],
            "stebejimo_data" => [Some("01/02/2023"), Some("03/02/2023"), Some("01/01/2023"), Some("01/01/2023"), Some("01/01/2023")],
            "savivaldybe" => ["Vilnius", "Kaunas", "Alytus", "Utena", "Šiauliai"],
            "extra" => [1i64, 2, 3, 4, 5],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_renames_and_filters() {
        let cleaned = clean(raw_frame(), &CleanOptions::default()).unwrap();

        assert_eq!(cleaned.height(), 2);
        let names: Vec<&str> = cleaned.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            [VDA_ID, PLANT_NAME, HARM_VALUE, OBSERVATION_DATE, MUNICIPALITY, "extra"]
        );

        let ids: Vec<Option<&str>> = cleaned.column(VDA_ID).unwrap().str().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);

        let harm: Vec<Option<f64>> = cleaned.column(HARM_VALUE).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(harm, vec![Some(10.0), Some(5.0)]);

        assert_eq!(cleaned.column(OBSERVATION_DATE).unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_unparseable_date_drops_row() {
        let raw = df!(
            "augalo_pavadinimas" => ["Rye", "Rye"],
            "zalingumo_ivertis" => ["4", "6"],
            "stebejimo_data" => ["vakar", "15/06/2021"],
        )
        .unwrap();

        let cleaned = clean(raw, &CleanOptions::default()).unwrap();
        let harm: Vec<Option<f64>> = cleaned.column(HARM_VALUE).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(harm, vec![Some(6.0)]);
    }

    #[test]
    fn test_empty_frame_without_columns() {
        let cleaned = clean(DataFrame::empty(), &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.height(), 0);
        assert_eq!(cleaned.column(HARM_VALUE).unwrap().dtype(), &DataType::Float64);
        assert_eq!(cleaned.column(OBSERVATION_DATE).unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_missing_required_column_drops_everything() {
        let raw = df!(
            "augalo_pavadinimas" => ["Rye"],
            "stebejimo_data" => ["15/06/2021"],
        )
        .unwrap();
        let cleaned = clean(raw, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.height(), 0);
    }

    #[test]
    fn test_numeric_harm_column() {
        let raw = df!(
            "augalo_pavadinimas" => ["Rye", "Oats"],
            "zalingumo_ivertis" => [Some(2i64), None],
            "stebejimo_data" => ["2021-06-15", "2021-06-16"],
        )
        .unwrap();
        let cleaned = clean(raw, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.column(HARM_VALUE).unwrap().f64().unwrap().get(0), Some(2.0));
    }

    #[test]
    fn test_month_first_option() {
        let raw = df!(
            "augalo_pavadinimas" => ["Rye"],
            "zalingumo_ivertis" => ["1"],
            "stebejimo_data" => ["02/01/2023"],
        )
        .unwrap();
        let cleaned = clean(raw, &CleanOptions { day_first: false }).unwrap();
        let days = cleaned.column(OBSERVATION_DATE).unwrap().date().unwrap().get(0).unwrap();
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(
            epoch + chrono::Duration::days(days as i64),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean(raw_frame(), &CleanOptions::default()).unwrap();
        let twice = clean(once.clone(), &CleanOptions::default()).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_rename_conflict() {
        let raw = df!(
            "augalo_pavadinimas" => ["Rye"],
            "plant_name" => ["Rye"],
        )
        .unwrap();
        let err = clean(raw, &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, PlantHarmError::RenameConflict { .. }));
    }

    #[test]
    fn test_preview() {
        let cleaned = clean(raw_frame(), &CleanOptions::default()).unwrap();
        assert_eq!(preview(&cleaned, 1).height(), 1);
        assert_eq!(preview(&cleaned, 10).height(), 2);
    }
}
