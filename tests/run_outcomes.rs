use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use csv_db_ingest::config::IngestionConfig;
use csv_db_ingest::ingestion::{FileObserver, IngestionObserver, LogLevel};
use csv_db_ingest::run::{run, RunOutcome};
use rusqlite::Connection;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingObserver {
    fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl IngestionObserver for RecordingObserver {
    fn record(&self, level: LogLevel, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}

fn tmp_path(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("csv-db-ingest-{name}-{nanos}.{ext}"))
}

fn config_for(input: PathBuf, database: PathBuf) -> IngestionConfig {
    IngestionConfig {
        input_path: input,
        table_name_override: None,
        database_path: database,
        batch_size: NonZeroUsize::new(1000).unwrap(),
        log_path: tmp_path("log", "log"),
    }
}

#[test]
fn end_to_end_run_ingests_csv_into_table() {
    let input = tmp_path("e2e", "csv");
    fs::write(&input, "product,quantity\nEspresso,12\nLatte,7\nCold Brew,3\n").unwrap();

    let database = tmp_path("e2e-db", "db");
    let mut config = config_for(input, database.clone());
    config.table_name_override = Some("sales".to_string());

    let obs = RecordingObserver::default();
    let outcome = run(&config, &obs);

    let RunOutcome::Ingested { table, rows } = outcome else {
        panic!("expected Ingested, got {outcome:?}");
    };
    assert_eq!(table, "sales");
    assert_eq!(rows, 3);

    let conn = Connection::open(&database).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sales", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 3);

    let first: (String, i64) = conn
        .query_row(
            "SELECT product, quantity FROM sales ORDER BY rowid LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(first, ("Espresso".to_string(), 12));

    let infos = obs.messages_at(LogLevel::Info);
    assert!(infos.iter().any(|m| m.contains("Ingesting into db as table \"sales\"")));
    assert!(infos.iter().any(|m| m == "Successfully created/replaced table: sales"));
}

#[test]
fn derived_table_name_is_used_when_no_override_is_set() {
    let input = tmp_path("derived", "csv");
    fs::write(&input, "id\n1\n").unwrap();

    let config = config_for(input.clone(), tmp_path("derived-db", "db"));
    let outcome = run(&config, &RecordingObserver::default());

    let RunOutcome::Ingested { table, rows } = outcome else {
        panic!("expected Ingested, got {outcome:?}");
    };
    assert_eq!(rows, 1);

    let base = input.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(table, base.strip_suffix(".csv").unwrap());
}

#[test]
fn missing_input_is_a_warning_and_touches_nothing() {
    let input = tmp_path("missing", "csv");
    let database = tmp_path("missing-db", "db");

    let obs = RecordingObserver::default();
    let outcome = run(&config_for(input.clone(), database.clone()), &obs);

    let RunOutcome::InputMissing { path } = outcome else {
        panic!("expected InputMissing, got {outcome:?}");
    };
    assert_eq!(path, input);
    assert!(!database.exists());

    let warnings = obs.messages_at(LogLevel::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Data file not found at:"));
}

#[test]
fn malformed_csv_reports_load_failure() {
    let input = tmp_path("ragged", "csv");
    fs::write(&input, "a,b\n1\n").unwrap();

    let obs = RecordingObserver::default();
    let outcome = run(&config_for(input, tmp_path("ragged-db", "db")), &obs);

    assert!(matches!(outcome, RunOutcome::LoadFailed { .. }));
    let errors = obs.messages_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Failed to load"));
}

#[test]
fn unopenable_database_reports_write_failure() {
    let input = tmp_path("nodb", "csv");
    fs::write(&input, "id\n1\n").unwrap();

    let database = tmp_path("no-such-dir", "d").join("nested").join("out.db");
    let obs = RecordingObserver::default();
    let outcome = run(&config_for(input, database), &obs);

    assert!(matches!(outcome, RunOutcome::WriteFailed { .. }));
    let errors = obs.messages_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Transaction rolled back"));
}

#[test]
fn every_run_logs_completion_and_timing() {
    let obs = RecordingObserver::default();
    let _ = run(
        &config_for(tmp_path("absent", "csv"), tmp_path("absent-db", "db")),
        &obs,
    );

    let infos = obs.messages_at(LogLevel::Info);
    assert!(infos.iter().any(|m| m == "Ingestion complete"));
    assert!(infos.iter().any(|m| m.starts_with("Total time taken:")));
}

#[test]
fn large_input_is_ingested_in_batches_without_loss() {
    let input = tmp_path("large", "csv");
    let mut body = String::from("id\n");
    for i in 0..2500 {
        body.push_str(&format!("{i}\n"));
    }
    fs::write(&input, body).unwrap();

    let database = tmp_path("large-db", "db");
    let mut config = config_for(input, database.clone());
    config.table_name_override = Some("big".to_string());

    let outcome = run(&config, &RecordingObserver::default());
    let RunOutcome::Ingested { rows, .. } = outcome else {
        panic!("expected Ingested, got {outcome:?}");
    };
    assert_eq!(rows, 2500);

    let conn = Connection::open(&database).unwrap();
    let mut stmt = conn.prepare("SELECT id FROM big ORDER BY rowid").unwrap();
    let ids: Vec<i64> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ids, (0..2500).collect::<Vec<i64>>());
}

#[test]
fn file_observer_appends_formatted_lines_and_creates_log_dir() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let log_dir = std::env::temp_dir().join(format!("csv-db-ingest-logs-{nanos}"));
    let log_path = log_dir.join("ingestion_db.log");
    assert!(!log_dir.exists());

    let observer = FileObserver::new(&log_path);
    let mut config = config_for(tmp_path("logged", "csv"), tmp_path("logged-db", "db"));
    config.log_path = log_path.clone();

    let _ = run(&config, &observer);

    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains(" - WARNING - Data file not found at:"));
    assert!(contents.contains(" - INFO - Ingestion complete"));

    // Append mode: a second run adds lines instead of truncating.
    let lines_after_first = contents.lines().count();
    let _ = run(&config, &observer);
    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.lines().count() > lines_after_first);
}
