use std::time::Duration;
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::error::DatabaseError;
use sqlx::AnyPool;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

// Portable between PostgreSQL and SQLite.
pub(crate) const BOOKS_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        isbn TEXT PRIMARY KEY,
        amazon_url TEXT NOT NULL,
        author TEXT NOT NULL,
        language TEXT NOT NULL,
        pages INTEGER NOT NULL CHECK (pages > 0),
        publisher TEXT NOT NULL,
        title TEXT NOT NULL,
        year INTEGER NOT NULL
    )"#;

const MAX_CONNECTIONS: u32 = 5;

// helper method to build the connection pool for the configured store
pub async fn build_pool(config: &Configuration) -> LibraryResult<AnyPool> {
    install_default_drivers();
    let url = config.database_url.as_str();
    let options = if RepositoryStore::is_in_memory(url) {
        // an in-memory database is dropped together with its last connection
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        AnyPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(5))
    };
    let pool = options.connect(url).await?;
    tracing::info!(store = ?config.store(), "connected to book store");
    Ok(pool)
}

pub async fn create_table(pool: &AnyPool) -> LibraryResult<()> {
    sqlx::query(BOOKS_TABLE_DDL)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(LibraryError::from)
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                LibraryError::not_found("no matching row")
            }
            sqlx::Error::Database(ref db_err) if is_unique_violation(&**db_err) => {
                LibraryError::duplicate_key(db_err.message())
            }
            sqlx::Error::Database(ref db_err) => {
                LibraryError::database(db_err.message(), db_err.code().map(|c| c.to_string()), false)
            }
            sqlx::Error::PoolTimedOut => {
                LibraryError::unavailable("timed out acquiring connection", Some("PoolTimedOut".to_string()), true)
            }
            sqlx::Error::PoolClosed => {
                LibraryError::unavailable("connection pool closed", Some("PoolClosed".to_string()), false)
            }
            sqlx::Error::Io(ref io_err) => {
                LibraryError::unavailable(format!("database io {}", io_err).as_str(), Some("Io".to_string()), true)
            }
            other => {
                LibraryError::database(format!("{:?}", other).as_str(), None, false)
            }
        }
    }
}

fn is_unique_violation(err: &dyn DatabaseError) -> bool {
    // 23505 is the postgres code, sqlite reports the failed constraint in its message
    err.is_unique_violation()
        || err.code().as_deref() == Some("23505")
        || err.message().contains("UNIQUE constraint failed")
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}
