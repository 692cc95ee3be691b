//! SQLite-backed persistence gateway.
//!
//! One [`SqliteStore`] owns the connection; each collection gets its own
//! repository handle cloned from it. Statements are short and run under a
//! single mutex, which is never held across an await point. Uniqueness
//! rules (user email, favorite pairs) and the application one-transition
//! rule live in the schema and the statements themselves, so a constraint
//! violation — not a pre-check — is what reports a conflict.

mod applications;
mod calculations;
mod favorites;
mod franchises;
mod users;

pub use applications::SqliteApplicationRepository;
pub use calculations::SqliteCalculationRepository;
pub use favorites::SqliteFavoriteRepository;
pub use franchises::SqliteFranchiseRepository;
pub use users::SqliteUserRepository;

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::Conflict
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound,
            other => RepositoryError::Unavailable(other.to_string()),
        }
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS franchises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    investment_amount INTEGER NOT NULL DEFAULT 0,
    format TEXT NOT NULL DEFAULT '',
    conditions TEXT NOT NULL DEFAULT '',
    contact_info TEXT NOT NULL DEFAULT '',
    template_path TEXT,
    created_by INTEGER,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS calculations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    franchise_id INTEGER NOT NULL,
    input_data TEXT NOT NULL,
    result_data TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    franchise_id INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    message TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    franchise_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(user_id, franchise_id)
);
";

/// Shared handle to the SQLite database. Cheap to clone; repository handles
/// built from it share the same connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Fresh private database, used by the tests.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.conn.clone())
    }

    pub fn franchises(&self) -> SqliteFranchiseRepository {
        SqliteFranchiseRepository::new(self.conn.clone())
    }

    pub fn calculations(&self) -> SqliteCalculationRepository {
        SqliteCalculationRepository::new(self.conn.clone())
    }

    pub fn applications(&self) -> SqliteApplicationRepository {
        SqliteApplicationRepository::new(self.conn.clone())
    }

    pub fn favorites(&self) -> SqliteFavoriteRepository {
        SqliteFavoriteRepository::new(self.conn.clone())
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.with_timezone(&Utc))
        .map_err(|err| RepositoryError::Unavailable(format!("invalid stored timestamp: {err}")))
}
