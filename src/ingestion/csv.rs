//! CSV loading and column-type inference.

use std::path::Path;

use csv::StringRecord;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Load a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first row is the header row and supplies column names.
/// - Each column gets a single inferred type by scanning all of its values.
/// - Empty cells become [`Value::Null`] and do not take part in inference.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestionError::InvalidInput {
            message: "input has no header row".to_string(),
        });
    }

    let mut records: Vec<StringRecord> = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let fields = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| Field::new(name, infer_column_type(&records, idx)))
        .collect();
    let schema = Schema::new(fields);

    let rows = records
        .iter()
        .map(|record| {
            schema
                .fields
                .iter()
                .enumerate()
                .map(|(idx, field)| typed_value(field.data_type, record.get(idx).unwrap_or("")))
                .collect()
        })
        .collect();

    Ok(DataSet::new(schema, rows))
}

/// Derive the target table name from the input file name.
///
/// Strips one trailing `.csv` from the base name and nothing else:
/// `sales.csv` becomes `sales`, `a.b.csv` becomes `a.b`, and
/// `archive.csv.csv` becomes `archive.csv`. A base name without the suffix
/// is used verbatim.
pub fn derive_table_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.strip_suffix(".csv") {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => base,
    }
}

/// Pick the narrowest type that every non-empty value in the column parses as.
///
/// Precedence is `Int64`, then `Float64`, then `Bool` (`true`/`false`,
/// case-insensitive), then `Utf8`. A column with no non-empty values defaults
/// to `Utf8`.
fn infer_column_type(records: &[StringRecord], col_idx: usize) -> DataType {
    let mut is_int = true;
    let mut is_float = true;
    let mut is_bool = true;
    let mut saw_value = false;

    for record in records {
        let raw = record.get(col_idx).unwrap_or("").trim();
        if raw.is_empty() {
            continue;
        }
        saw_value = true;

        if is_int && raw.parse::<i64>().is_err() {
            is_int = false;
        }
        if is_float && raw.parse::<f64>().is_err() {
            is_float = false;
        }
        if is_bool && !raw.eq_ignore_ascii_case("true") && !raw.eq_ignore_ascii_case("false") {
            is_bool = false;
        }
        if !is_int && !is_float && !is_bool {
            break;
        }
    }

    if !saw_value {
        DataType::Utf8
    } else if is_int {
        DataType::Int64
    } else if is_float {
        DataType::Float64
    } else if is_bool {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

/// Convert one raw cell into a typed [`Value`].
///
/// Inference has already seen every value in the column, so the parses here
/// succeed; an unparsable cell falls back to text rather than failing.
fn typed_value(data_type: DataType, raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match data_type {
        DataType::Utf8 => Value::Utf8(trimmed.to_owned()),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .unwrap_or_else(|_| Value::Utf8(trimmed.to_owned())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .unwrap_or_else(|_| Value::Utf8(trimmed.to_owned())),
        DataType::Bool => Value::Bool(trimmed.eq_ignore_ascii_case("true")),
    }
}
