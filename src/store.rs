//! Read-only handle to the climate database.

use crate::cli::CommandLineArgs;
use crate::error::ClimateApiError;
use crate::schema::{MEASUREMENT_COLUMNS, STATION_COLUMNS};

use std::path::Path;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use expanduser::expanduser;
use url::Url;

/// A database session checked out of the pool.
///
/// The session is returned to the pool when dropped.
pub type Session = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Connection customiser that forbids writes on every pooled connection.
#[derive(Debug)]
struct QueryOnly;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for QueryOnly {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA query_only = ON")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// [crate::store::Store] is a cheaply cloneable handle to a pool of read-only SQLite
/// connections. Each request checks out its own [Session].
#[derive(Clone)]
pub struct Store {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Store {
    /// Open the database named by the command line arguments and check its schema.
    pub fn open(args: &CommandLineArgs) -> Result<Self, ClimateApiError> {
        let path = expanduser(&args.database).map_err(|_| ClimateApiError::DatabaseNotFound {
            path: args.database.clone(),
        })?;
        Self::open_path(
            &path,
            args.pool_size,
            Duration::from_secs(args.connection_timeout),
        )
    }

    /// Open the database at `path` with a pool of at most `pool_size` sessions.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to an existing SQLite file
    /// * `pool_size`: Maximum number of concurrent sessions
    /// * `connection_timeout`: Maximum time to wait for a free session
    pub fn open_path(
        path: &Path,
        pool_size: u32,
        connection_timeout: Duration,
    ) -> Result<Self, ClimateApiError> {
        if !path.is_file() {
            return Err(ClimateApiError::DatabaseNotFound {
                path: path.display().to_string(),
            });
        }
        let manager = ConnectionManager::<SqliteConnection>::new(read_only_uri(path)?);
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(connection_timeout)
            .connection_customizer(Box::new(QueryOnly))
            .build(manager)?;
        let store = Self { pool };
        store.validate_schema()?;
        tracing::info!("Opened climate database {}", path.display());
        Ok(store)
    }

    /// Check out a session.
    pub fn session(&self) -> Result<Session, ClimateApiError> {
        Ok(self.pool.get()?)
    }

    /// Check that the `station` and `measurement` tables exist with the expected columns.
    fn validate_schema(&self) -> Result<(), ClimateApiError> {
        let mut session = self.session()?;
        validate_table(&mut session, "station", STATION_COLUMNS)?;
        validate_table(&mut session, "measurement", MEASUREMENT_COLUMNS)?;
        Ok(())
    }
}

/// Returns an SQLite URI that opens `path` read-only.
///
/// The path is percent-encoded, so `#`, `?` and `%` in directory or file names reach SQLite
/// unchanged.
fn read_only_uri(path: &Path) -> Result<String, ClimateApiError> {
    let not_found = || ClimateApiError::DatabaseNotFound {
        path: path.display().to_string(),
    };
    let absolute = path.canonicalize().map_err(|_| not_found())?;
    let mut uri = Url::from_file_path(absolute).map_err(|_| not_found())?;
    uri.set_query(Some("mode=ro"));
    Ok(uri.into())
}

#[derive(QueryableByName)]
struct ColumnName {
    #[diesel(sql_type = Text)]
    name: String,
}

fn validate_table(
    conn: &mut SqliteConnection,
    table: &'static str,
    expected: &[&'static str],
) -> Result<(), ClimateApiError> {
    let columns: Vec<String> = diesel::sql_query("SELECT name FROM pragma_table_info(?)")
        .bind::<Text, _>(table)
        .load::<ColumnName>(conn)?
        .into_iter()
        .map(|c| c.name)
        .collect();
    if columns.is_empty() {
        return Err(ClimateApiError::MissingTable { table });
    }
    let missing = expected
        .iter()
        .copied()
        .find(|column| !columns.iter().any(|c| c.as_str() == *column));
    match missing {
        Some(column) => Err(ClimateApiError::MissingColumn { table, column }),
        None => Ok(()),
    }
}
