//! `csv-db-ingest` is a small one-shot ingestion utility: it loads a single
//! CSV file into an in-memory [`types::DataSet`] with inferred column types,
//! then replaces the table of the same name in an embedded SQLite database.
//!
//! The primary entrypoint is [`run::run`], which the bundled binary calls
//! with a default [`config::IngestionConfig`] and a file+console observer
//! pair. Library callers can supply their own config and observer.
//!
//! ## What a run does
//!
//! 1. Check the input file exists. A missing file is a warning, not an
//!    error: the run completes normally without touching the database.
//! 2. Parse the CSV into a [`types::DataSet`]. Column names come from the
//!    header row; column types are inferred from the data
//!    ([`types::DataType::Int64`], [`types::DataType::Float64`],
//!    [`types::DataType::Bool`], or [`types::DataType::Utf8`]; empty cells
//!    are [`types::Value::Null`]).
//! 3. Derive the target table name from the file name (`sales.csv` →
//!    `sales`; only one trailing `.csv` is stripped), unless the config
//!    carries an override.
//! 4. Drop and re-create the table, then insert every row in statements of
//!    at most `batch_size` rows, all inside one transaction. A failure
//!    anywhere rolls the whole replacement back.
//! 5. Log outcome and timing to the append-mode log file and the console.
//!
//! No failure escapes the run: the result is a [`run::RunOutcome`] tag, and
//! the process exits 0 either way.
//!
//! ## Quick example
//!
//! ```no_run
//! use csv_db_ingest::config::IngestionConfig;
//! use csv_db_ingest::ingestion::ConsoleObserver;
//! use csv_db_ingest::run::{run, RunOutcome};
//!
//! let config = IngestionConfig {
//!     input_path: "data/sales.csv".into(),
//!     database_path: "data/ingest.db".into(),
//!     ..Default::default()
//! };
//!
//! match run(&config, &ConsoleObserver) {
//!     RunOutcome::Ingested { table, rows } => println!("{rows} rows -> {table}"),
//!     other => println!("run ended without ingesting: {other:?}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: run settings (paths, table-name override, batch size)
//! - [`ingestion`]: CSV loading, type inference, and run observability
//! - [`writer`]: transactional drop/create/batched-insert against SQLite
//! - [`run`]: the top-level run function and its tagged outcome
//! - [`types`]: in-memory dataset types
//! - [`error`]: error types shared by the loader and writer

pub mod config;
pub mod error;
pub mod ingestion;
pub mod run;
pub mod types;
pub mod writer;

pub use error::{IngestionError, IngestionResult};
pub use run::{run, RunOutcome};
