//! Top-level run orchestration.
//!
//! [`run`] is the single structured decision point of the crate: check the
//! input exists, load it, replace the target table, and report outcome and
//! timing through the observer. It never returns an error; every failure is
//! absorbed into a [`RunOutcome`] variant after being logged, and the entry
//! point decides the process exit status from the variant.

use std::path::PathBuf;
use std::time::Instant;

use rusqlite::Connection;

use crate::config::IngestionConfig;
use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::load_csv_from_path;
use crate::ingestion::observability::{IngestionObserver, LogLevel};
use crate::types::DataSet;
use crate::writer::replace_table;

/// Outcome of a single ingestion run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The table was created or replaced with the file's contents.
    Ingested {
        /// Name of the written table.
        table: String,
        /// Number of rows inserted.
        rows: usize,
    },
    /// The input file does not exist; nothing was written.
    InputMissing {
        /// The path that was checked.
        path: PathBuf,
    },
    /// The input file exists but could not be parsed.
    LoadFailed {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying parse/read error.
        error: IngestionError,
    },
    /// The dataset parsed, but the database could not be opened or written.
    /// The whole replacement was rolled back.
    WriteFailed {
        /// The table the run was writing.
        table: String,
        /// The underlying database error.
        error: IngestionError,
    },
}

/// Execute one ingestion run against `config`, reporting events to
/// `observer`.
///
/// Always finishes with `Ingestion complete` and a total-time event,
/// whatever the outcome.
pub fn run(config: &IngestionConfig, observer: &dyn IngestionObserver) -> RunOutcome {
    let start = Instant::now();
    let outcome = execute(config, observer);

    observer.record(LogLevel::Info, "Ingestion complete");
    observer.record(
        LogLevel::Info,
        &format!("Total time taken: {:.2} s", start.elapsed().as_secs_f64()),
    );
    outcome
}

fn execute(config: &IngestionConfig, observer: &dyn IngestionObserver) -> RunOutcome {
    if !config.input_path.exists() {
        observer.record(
            LogLevel::Warning,
            &format!("Data file not found at: {}", config.input_path.display()),
        );
        return RunOutcome::InputMissing {
            path: config.input_path.clone(),
        };
    }

    let dataset = match load_csv_from_path(&config.input_path) {
        Ok(ds) => ds,
        Err(error) => {
            observer.record(
                LogLevel::Error,
                &format!("Failed to load {}: {error}", config.input_path.display()),
            );
            return RunOutcome::LoadFailed {
                path: config.input_path.clone(),
                error,
            };
        }
    };

    let table = config.table_name();
    observer.record(
        LogLevel::Info,
        &format!(
            "Loaded {}. Ingesting into db as table \"{table}\"",
            config.input_path.display()
        ),
    );

    observer.record(
        LogLevel::Info,
        &format!("Writing {} rows into table: {table}", dataset.row_count()),
    );

    match write_dataset(config, &table, &dataset) {
        Ok(()) => {
            observer.record(
                LogLevel::Info,
                &format!("Successfully created/replaced table: {table}"),
            );
            RunOutcome::Ingested {
                table,
                rows: dataset.row_count(),
            }
        }
        Err(error) => {
            observer.record(
                LogLevel::Error,
                &format!("Error with table {table}. Transaction rolled back. Reason: {error}"),
            );
            RunOutcome::WriteFailed { table, error }
        }
    }
}

fn write_dataset(config: &IngestionConfig, table: &str, dataset: &DataSet) -> IngestionResult<()> {
    let mut conn = Connection::open(&config.database_path)?;
    replace_table(&mut conn, table, dataset, config.batch_size)
}
