//! Fixture databases and arguments shared by unit tests.

use crate::cli::CommandLineArgs;
use crate::store::Store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use tempfile::TempDir;

/// Schema of the climate database as produced by the dataset's loader.
pub(crate) const FIXTURE_SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
";

/// Rows to load into a fixture database, in insertion order.
pub(crate) struct Fixture {
    /// (code, name)
    pub stations: Vec<(&'static str, &'static str)>,
    /// (station, date, prcp, tobs)
    pub measurements: Vec<(&'static str, &'static str, Option<f64>, f64)>,
}

impl Default for Fixture {
    /// A small dataset whose most recent date is 2017-08-23, giving a cutoff of 2016-08-23.
    ///
    /// USC00519397 has the most rows. Two dates have reports from more than one station.
    fn default() -> Self {
        Self {
            stations: vec![
                ("USC00519397", "WAIKIKI 717.2, HI US"),
                ("USC00513117", "KANEOHE 838.1, HI US"),
                ("USC00514830", "KUALOA RANCH HEADQUARTERS 886.9, HI US"),
            ],
            measurements: vec![
                ("USC00519397", "2015-05-05", Some(1.0), 58.0),
                ("USC00513117", "2016-08-22", Some(0.1), 70.0),
                ("USC00519397", "2016-08-23", Some(0.2), 72.0),
                ("USC00519397", "2017-01-01", None, 65.0),
                ("USC00513117", "2017-01-01", Some(0.5), 66.0),
                ("USC00519397", "2017-08-22", Some(0.0), 80.0),
                ("USC00519397", "2017-08-23", Some(0.45), 81.0),
                ("USC00513117", "2017-08-23", Some(0.3), 79.0),
            ],
        }
    }
}

impl Fixture {
    /// A dataset with stations but no measurements.
    pub(crate) fn without_measurements() -> Self {
        Self {
            measurements: vec![],
            ..Self::default()
        }
    }

    fn insert_sql(&self) -> String {
        let mut sql = String::new();
        for (code, name) in &self.stations {
            sql.push_str(&format!(
                "INSERT INTO station (station, name, latitude, longitude, elevation) \
                 VALUES ('{}', '{}', 21.2716, -157.8168, 3.0);\n",
                code, name
            ));
        }
        for (station, date, prcp, tobs) in &self.measurements {
            let prcp = prcp.map_or("NULL".to_string(), |p| p.to_string());
            sql.push_str(&format!(
                "INSERT INTO measurement (station, date, prcp, tobs) \
                 VALUES ('{}', '{}', {}, {});\n",
                station, date, prcp, tobs
            ));
        }
        sql
    }
}

/// Create `hawaii.sqlite` in `dir` by running `sql` against a fresh database.
pub(crate) fn create_database(dir: &TempDir, sql: &str) -> PathBuf {
    create_database_in(dir.path(), sql)
}

/// Create `hawaii.sqlite` in the existing directory `dir` by running `sql` against a fresh
/// database.
pub(crate) fn create_database_in(dir: &Path, sql: &str) -> PathBuf {
    let path = dir.join("hawaii.sqlite");
    let mut conn = SqliteConnection::establish(&path.display().to_string()).unwrap();
    conn.batch_execute(sql).unwrap();
    path
}

/// The fixture schema and rows as one SQL script.
pub(crate) fn fixture_sql(fixture: &Fixture) -> String {
    format!("{}{}", FIXTURE_SCHEMA, fixture.insert_sql())
}

/// Create a fixture database and open a single-session [Store] over it.
///
/// The [TempDir] must be kept alive for as long as the store is used.
pub(crate) fn open_fixture(fixture: &Fixture) -> (TempDir, Store) {
    open_fixture_with(fixture, "")
}

/// As [open_fixture], running `extra_sql` after the fixture rows are inserted.
pub(crate) fn open_fixture_with(fixture: &Fixture, extra_sql: &str) -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let sql = format!("{}{}", fixture_sql(fixture), extra_sql);
    let path = create_database(&dir, &sql);
    let store = Store::open_path(&path, 1, Duration::from_secs(1)).unwrap();
    (dir, store)
}

/// Create a CommandLineArgs object with default values.
pub(crate) fn get_test_args() -> CommandLineArgs {
    CommandLineArgs {
        host: "127.0.0.1".to_string(),
        port: 8080,
        database: "Resources/hawaii.sqlite".to_string(),
        pool_size: 1,
        connection_timeout: 1,
        https: false,
        cert_file: "cert.pem".to_string(),
        key_file: "key.pem".to_string(),
        graceful_shutdown_timeout: 1,
        log_json: false,
    }
}
