//! Run configuration.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ingestion::derive_table_name;

/// Default rows-per-statement for batched inserts.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Settings for a single ingestion run.
///
/// Constructed once at startup and never mutated afterwards; the run layer
/// and the writer only ever see it by shared reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Delimited text file to ingest.
    pub input_path: PathBuf,
    /// Use this table name instead of deriving one from the file name.
    pub table_name_override: Option<String>,
    /// SQLite database the table is written into (`:memory:` also works).
    pub database_path: PathBuf,
    /// Maximum rows per `INSERT` statement.
    pub batch_size: NonZeroUsize,
    /// Append-mode log file; its parent directory is created if missing.
    pub log_path: PathBuf,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/sales.csv"),
            table_name_override: None,
            database_path: PathBuf::from("data/ingest.db"),
            batch_size: DEFAULT_BATCH_SIZE,
            log_path: PathBuf::from("logs/ingestion_db.log"),
        }
    }
}

impl IngestionConfig {
    /// Table name for this run: the override when set, otherwise derived
    /// from the input file name.
    pub fn table_name(&self) -> String {
        match &self.table_name_override {
            Some(name) => name.clone(),
            None => derive_table_name(&self.input_path),
        }
    }
}
