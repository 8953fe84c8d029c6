//! Table replacement in the embedded database.
//!
//! The writer owns the destructive half of a run: drop the target table,
//! re-create it from the dataset's inferred schema, and insert every row in
//! order. All of it happens inside one transaction, so a failed run leaves
//! the database exactly as it was.

use std::num::NonZeroUsize;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{Connection, ToSql};

use crate::error::IngestionResult;
use crate::types::{DataSet, DataType, Value};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Int64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Float64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Utf8(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        })
    }
}

/// SQLite column declaration for a logical type.
fn sql_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Int64 => "INTEGER",
        DataType::Float64 => "REAL",
        DataType::Bool => "BOOLEAN",
        DataType::Utf8 => "TEXT",
    }
}

/// Double-quote an identifier so table/column names with spaces, dots, or
/// reserved words reach the database verbatim.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// SQLite's default SQLITE_MAX_VARIABLE_NUMBER.
const MAX_BOUND_PARAMS: usize = 32766;

/// Rows one INSERT statement may hold: the configured batch size, reduced
/// for wide datasets so `rows * columns` bound parameters stay within
/// [`MAX_BOUND_PARAMS`]. Always at least 1.
fn rows_per_statement(batch_size: NonZeroUsize, columns: usize) -> usize {
    let budget = (MAX_BOUND_PARAMS / columns.max(1)).max(1);
    batch_size.get().min(budget)
}

/// Drop and re-create `table_name` from `dataset`, inserting all rows in
/// statements of at most `batch_size` rows each, inside a single transaction.
/// Wide datasets use fewer rows per statement so no statement exceeds
/// SQLite's bound-parameter limit.
///
/// Row order is preserved. An empty dataset still replaces the table
/// definition; the new table just ends up with zero rows.
pub fn replace_table(
    conn: &mut Connection,
    table_name: &str,
    dataset: &DataSet,
    batch_size: NonZeroUsize,
) -> IngestionResult<()> {
    let tx = conn.transaction()?;
    let table = quote_ident(table_name);

    tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;

    let columns: Vec<String> = dataset
        .schema
        .fields
        .iter()
        .map(|f| format!("{} {}", quote_ident(&f.name), sql_type(f.data_type)))
        .collect();
    tx.execute_batch(&format!("CREATE TABLE {table} ({})", columns.join(", ")))?;

    let column_list = dataset
        .schema
        .field_names()
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(", ");
    let row_placeholder = format!("({})", vec!["?"; dataset.schema.fields.len()].join(", "));

    let chunk_rows = rows_per_statement(batch_size, dataset.schema.fields.len());
    for batch in dataset.rows.chunks(chunk_rows) {
        let placeholders = vec![row_placeholder.as_str(); batch.len()].join(", ");
        let sql = format!("INSERT INTO {table} ({column_list}) VALUES {placeholders}");
        tx.execute(&sql, rusqlite::params_from_iter(batch.iter().flatten()))?;
    }

    tx.commit()?;
    Ok(())
}
