//! Loading and run observability.
//!
//! [`load_csv_from_path`] parses the input file into an in-memory
//! [`crate::types::DataSet`] with inferred column types, and
//! [`derive_table_name`] maps the input file name to the target table name.
//! Leveled run events are reported through the observers in
//! [`observability`].

pub mod csv;
pub mod observability;

pub use csv::{derive_table_name, load_csv_from_path, load_csv_from_reader};
pub use observability::{
    CompositeObserver, ConsoleObserver, FileObserver, IngestionObserver, LogLevel,
};
