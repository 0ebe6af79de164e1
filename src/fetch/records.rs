use crate::fetch::error::FetchError;
use polars::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

/// Key under which the data portal wraps the record array.
pub const DATA_ENVELOPE_KEY: &str = "_data";

/// Picks the record array out of a response body.
///
/// An array body is used as-is. An object body is unwrapped through
/// [`DATA_ENVELOPE_KEY`], falling back to the body itself when the key is absent.
fn extract_records(body: &Value) -> Result<&[Value], FetchError> {
    let records = match body {
        Value::Object(envelope) => envelope.get(DATA_ENVELOPE_KEY).unwrap_or(body),
        other => other,
    };

    match records {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Err(FetchError::UnexpectedPayload(format!(
            "expected an array of records or an object with a '{}' array",
            DATA_ENVELOPE_KEY
        ))),
        other => Err(FetchError::UnexpectedPayload(format!(
            "expected an array of records, found {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Raw cells are kept as text; typing happens during cleaning.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// Converts a response body into the raw observation table.
///
/// Columns are the union of keys over all records, in order of first appearance.
/// Every column is a nullable string column; a record that lacks a key gets a
/// null cell. Every record is one row, so records without any keys still count
/// toward the height. An empty record array yields a table with no rows and no
/// columns.
pub fn records_to_frame(body: &Value) -> Result<DataFrame, FetchError> {
    let records = extract_records(body)?;
    if records.is_empty() {
        return Ok(DataFrame::empty());
    }

    let mut names: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<Option<String>>> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(FetchError::UnexpectedPayload(format!(
                "record {} is {}, expected an object",
                row,
                json_kind(record)
            )));
        };

        for (key, value) in fields {
            let idx = *index_of.entry(key.clone()).or_insert_with(|| {
                names.push(key.clone());
                // Backfill rows seen before this key first appeared
                cells.push(vec![None; row]);
                cells.len() - 1
            });
            cells[idx].push(cell_text(value));
        }

        for column in cells.iter_mut() {
            if column.len() < row + 1 {
                column.push(None);
            }
        }
    }

    if names.is_empty() {
        return Ok(DataFrame::full_null(&Schema::default(), records.len()));
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();

    DataFrame::new(columns).map_err(FetchError::FrameBuild)
}
