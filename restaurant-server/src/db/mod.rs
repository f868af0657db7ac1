//! Database access layer (SQLite via sqlx)
//!
//! Free functions per table taking `&SqlitePool` or a transaction.
//! Storage errors are returned as `sqlx::Error` and turned into
//! generic 500 responses at the service boundary.

pub mod dashboard;
pub mod inventory_items;
pub mod menu_items;
pub mod orders;
pub mod reservations;
pub mod reviews;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

/// 写锁等待上限, 超过后返回 SQLITE_BUSY
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `BEGIN IMMEDIATE`: 事务开始即持有写锁, 并发写事务在 busy timeout 内排队
///
/// 先读后写的默认 (deferred) 事务在 WAL 下升级写锁时若快照已过期会立即失败
pub const BEGIN_IMMEDIATE: &str = "BEGIN IMMEDIATE";

/// Open a connection pool with foreign keys enforced
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// In-memory database for tests
///
/// A single connection that never idles out, otherwise each new connection
/// would see its own empty database.
pub async fn open_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Apply embedded migrations
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
