use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    COL_DAYS, COL_FREQUENCY, COL_GENDER, COL_GOAL, COL_LEVEL, COL_SPLIT, RoutineRecord, Table,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a routine table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one routine per row
/// * `.json`    – `[{ "Nivel": "...", "Días/Semana": 3, ... }, ...]`
/// * `.parquet` – flat scalar columns
///
/// Column names are whitespace-trimmed on load. A missing required column is
/// not a load failure; the table simply records which columns were present.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Cell parsing helpers
// ---------------------------------------------------------------------------

/// Parse a day count. Accepts plain integers and float spellings ("3.0").
fn parse_days(s: &str) -> Result<i64> {
    if s.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Ok(n);
    }
    let f: f64 = s
        .parse()
        .with_context(|| format!("'{s}' is not a number of days"))?;
    Ok(f as i64)
}

fn parse_frequency(s: &str) -> Result<f64> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse()
        .with_context(|| format!("'{s}' is not a numeric frequency code"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| headers.iter().position(|h| h == name);
    let level_idx = idx(COL_LEVEL);
    let days_idx = idx(COL_DAYS);
    let goal_idx = idx(COL_GOAL);
    let gender_idx = idx(COL_GENDER);
    let frequency_idx = idx(COL_FREQUENCY);
    let split_idx = idx(COL_SPLIT);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: Option<usize>| i.and_then(|i| record.get(i)).unwrap_or("").trim();

        records.push(RoutineRecord {
            level: cell(level_idx).to_string(),
            days_per_week: parse_days(cell(days_idx))
                .with_context(|| format!("CSV row {row_no}, '{COL_DAYS}'"))?,
            goal: cell(goal_idx).to_string(),
            gender: cell(gender_idx).to_string(),
            frequency: parse_frequency(cell(frequency_idx))
                .with_context(|| format!("CSV row {row_no}, '{COL_FREQUENCY}'"))?,
            recommended_split: cell(split_idx).to_string(),
        });
    }

    Ok(Table::new(records, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Nivel": "Beginner",
///     "Días/Semana": 3,
///     "Objetivo": "Strength",
///     "Género": "Male, Female",
///     "Frecuencia": 1.0,
///     "Split Recomendado": "Full Body"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for key in obj.keys() {
            let trimmed = key.trim();
            if !columns.iter().any(|c| c == trimmed) {
                columns.push(trimmed.to_string());
            }
        }

        let field = |name: &str| obj.iter().find(|(k, _)| k.trim() == name).map(|(_, v)| v);

        records.push(RoutineRecord {
            level: json_string(field(COL_LEVEL)),
            days_per_week: json_integer(field(COL_DAYS), i, COL_DAYS)?,
            goal: json_string(field(COL_GOAL)),
            gender: json_string(field(COL_GENDER)),
            frequency: json_float(field(COL_FREQUENCY), i, COL_FREQUENCY)?,
            recommended_split: json_string(field(COL_SPLIT)),
        });
    }

    Ok(Table::new(records, columns))
}

fn json_string(val: Option<&JsonValue>) -> String {
    match val {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn json_integer(val: Option<&JsonValue>, row: usize, col: &str) -> Result<i64> {
    match val {
        None | Some(JsonValue::Null) => Ok(0),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .with_context(|| format!("Row {row}, '{col}': {n} is not an integer")),
        Some(JsonValue::String(s)) => parse_days(s.trim()).with_context(|| format!("Row {row}, '{col}'")),
        Some(other) => bail!("Row {row}, '{col}': {other} is not a number"),
    }
}

fn json_float(val: Option<&JsonValue>, row: usize, col: &str) -> Result<f64> {
    match val {
        None | Some(JsonValue::Null) => Ok(f64::NAN),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .with_context(|| format!("Row {row}, '{col}': {n} is not a float")),
        Some(JsonValue::String(s)) => {
            parse_frequency(s.trim()).with_context(|| format!("Row {row}, '{col}'"))
        }
        Some(other) => bail!("Row {row}, '{col}': {other} is not a number"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let idx = |name: &str| columns.iter().position(|c| c == name);
    let level_idx = idx(COL_LEVEL);
    let days_idx = idx(COL_DAYS);
    let goal_idx = idx(COL_GOAL);
    let gender_idx = idx(COL_GENDER);
    let frequency_idx = idx(COL_FREQUENCY);
    let split_idx = idx(COL_SPLIT);

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let string_cell = |i: Option<usize>| {
                i.map(|i| string_at(batch.column(i), row)).unwrap_or_default()
            };

            let days_per_week = match days_idx {
                Some(i) => i64_at(batch.column(i), row)
                    .with_context(|| format!("Row {row}: failed to read '{COL_DAYS}'"))?,
                None => 0,
            };
            let frequency = match frequency_idx {
                Some(i) => f64_at(batch.column(i), row)
                    .with_context(|| format!("Row {row}: failed to read '{COL_FREQUENCY}'"))?,
                None => f64::NAN,
            };

            records.push(RoutineRecord {
                level: string_cell(level_idx),
                days_per_week,
                goal: string_cell(goal_idx),
                gender: string_cell(gender_idx),
                frequency,
                recommended_split: string_cell(split_idx),
            });
        }
    }

    Ok(Table::new(records, columns))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell; non-string columns read as empty.
fn string_at(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            arr.value(row).trim().to_string()
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            arr.value(row).trim().to_string()
        }
        _ => String::new(),
    }
}

fn i64_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        return Ok(0);
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            parse_days(arr.value(row).trim())
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn f64_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    match col.data_type() {
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            parse_frequency(arr.value(row).trim())
        }
        other => bail!("expected a float column, got {other:?}"),
    }
}
