#![cfg_attr(
    not(any(feature = "pg", feature = "mysql", feature = "sqlite")),
    allow(
        unused_imports,
        unused_variables,
        dead_code,
        unreachable_code,
        unused_lifetimes
    )
)]

//! Connection provider for the user data-access layer.
//!
//! `DbHandle` opens exactly one database connection (SQLite, PostgreSQL or
//! MySQL through SQLx) and exposes it as a SeaORM `DatabaseConnection`.
//! The handle is owned by the caller: repositories borrow a clone of the
//! connection and never open or close it themselves.
//!
//! # Features
//! - `sqlite` (default), `pg`, `mysql`: enable SQLx backends
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> db::Result<()> {
//!     use db::{ConnectOpts, DbHandle};
//!     use sea_orm::{ConnectionTrait, Statement};
//!
//!     let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//!     let conn = db.sea();
//!     conn.execute(Statement::from_string(conn.get_database_backend(), "SELECT 1"))
//!         .await?;
//!
//!     db.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod logging;

pub use config::DbConfig;
pub use errors::{DbError, Result};

use std::time::Duration;

#[cfg(feature = "mysql")]
use sqlx::mysql::MySqlPoolOptions;
#[cfg(feature = "pg")]
use sqlx::postgres::PgPoolOptions;
#[cfg(feature = "sqlite")]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
#[cfg(feature = "sqlite")]
use std::str::FromStr;

use sea_orm::DatabaseConnection;
#[cfg(feature = "mysql")]
use sea_orm::SqlxMySqlConnector;
#[cfg(feature = "pg")]
use sea_orm::SqlxPostgresConnector;
#[cfg(feature = "sqlite")]
use sea_orm::SqlxSqliteConnector;

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    MySql,
    Sqlite,
}

/// Connection options.
/// Each driver applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Timeout to establish the connection.
    pub acquire_timeout: Option<Duration>,
    /// SQLite-specific: busy timeout used via PRAGMA busy_timeout.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            acquire_timeout: Some(Duration::from_secs(30)),
            sqlite_busy_timeout: Some(Duration::from_millis(5_000)),
            create_sqlite_dirs: true,
        }
    }
}

/// Main handle.
pub struct DbHandle {
    engine: DbEngine,
    dsn: String,
    sea: DatabaseConnection,
}

// SQLx drives the single connection through a pool object. Capping it at one
// connection with no idle expiry keeps every statement on the same session,
// which in-memory SQLite relies on.
macro_rules! single_connection {
    ($opts:expr, $connect_opts:expr) => {{
        let mut o = $opts
            .max_connections(1)
            .min_connections(0)
            .idle_timeout(None)
            .max_lifetime(None);
        if let Some(t) = $connect_opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }
        o
    }};
}

impl DbHandle {
    /// Detect engine by DSN.
    ///
    /// Note: we only check scheme prefixes and don't mutate the tail (credentials etc.).
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        // Trim only leading spaces/newlines to be forgiving with env files.
        let s = dsn.trim_start();

        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("mysql://") {
            Ok(DbEngine::MySql)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(dsn.to_string()))
        }
    }

    /// Connect using a loaded [`DbConfig`].
    pub async fn from_config(cfg: &DbConfig) -> Result<Self> {
        Self::connect(&cfg.dsn, cfg.connect_opts()).await
    }

    /// Open the connection and build the handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        let sea = match engine {
            #[cfg(feature = "pg")]
            DbEngine::Postgres => {
                let pool = single_connection!(PgPoolOptions::new(), opts)
                    .connect(dsn)
                    .await?;
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
            }
            #[cfg(feature = "mysql")]
            DbEngine::MySql => {
                let pool = single_connection!(MySqlPoolOptions::new(), opts)
                    .connect(dsn)
                    .await?;
                SqlxMySqlConnector::from_sqlx_mysql_pool(pool)
            }
            #[cfg(feature = "sqlite")]
            DbEngine::Sqlite => {
                prepare_sqlite_path(dsn, opts.create_sqlite_dirs)?;
                let connect_opts = SqliteConnectOptions::from_str(dsn)?.create_if_missing(true);

                // Copy busy timeout into the closure (per-connection PRAGMAs)
                let busy = opts.sqlite_busy_timeout;
                let o = single_connection!(SqlitePoolOptions::new(), opts).after_connect(
                    move |conn, _meta| {
                        Box::pin(async move {
                            sqlx::query("PRAGMA journal_mode = WAL")
                                .execute(&mut *conn)
                                .await?;

                            sqlx::query("PRAGMA synchronous = NORMAL")
                                .execute(&mut *conn)
                                .await?;

                            if let Some(ms) = busy {
                                // PRAGMA can't use bind parameters; use a numeric literal.
                                let ms = i64::try_from(ms.as_millis()).unwrap_or(i64::MAX);
                                let stmt = format!("PRAGMA busy_timeout = {ms}");
                                sqlx::query(&stmt).execute(&mut *conn).await?;
                            }

                            Ok(())
                        })
                    },
                );

                let pool = o.connect_with(connect_opts).await?;
                SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
            }
            #[cfg(not(feature = "pg"))]
            DbEngine::Postgres => {
                return Err(DbError::FeatureDisabled("PostgreSQL feature not enabled"))
            }
            #[cfg(not(feature = "mysql"))]
            DbEngine::MySql => return Err(DbError::FeatureDisabled("MySQL feature not enabled")),
            #[cfg(not(feature = "sqlite"))]
            DbEngine::Sqlite => return Err(DbError::FeatureDisabled("SQLite feature not enabled")),
        };

        tracing::info!(
            engine = ?engine,
            dsn = %redact_credentials_in_dsn(Some(dsn)),
            "Opened database connection"
        );

        Ok(Self {
            engine,
            dsn: dsn.to_string(),
            sea,
        })
    }

    /// Explicit close. Dropping the last clone of the connection also closes it.
    pub async fn close(self) -> Result<()> {
        self.sea.close().await?;
        tracing::debug!(engine = ?self.engine, "Closed database connection");
        Ok(())
    }

    /// Get the backend.
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// DSN the handle was opened with (may contain credentials; redact before logging).
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Get SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Borrow the SeaORM connection.
    pub fn seaorm(&self) -> &DatabaseConnection {
        &self.sea
    }
}

/// Mask the password of a DSN so it can be logged.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => {
            if let Ok(mut parsed) = url::Url::parse(dsn) {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            } else {
                "***".to_string()
            }
        }
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}

// ===================== helpers =====================

#[cfg(feature = "sqlite")]
fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> Result<()> {
    // Only try to create directories for plain file paths; ignore :memory: cases.
    if !create_dirs || dsn.contains(":memory:") {
        return Ok(());
    }

    // Handles "sqlite:/path" and "sqlite://path", with or without "?mode=..." options.
    // For URI forms like "sqlite:file:memdb?..." there is no filesystem dir to create.
    let raw = if let Some(rest) = dsn.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = dsn.strip_prefix("sqlite:") {
        rest
    } else {
        dsn
    };
    let raw = raw.split_once('?').map_or(raw, |(path, _query)| path);

    if !raw.starts_with("file:") {
        if let Some(parent) = std::path::Path::new(raw).parent() {
            if !parent.as_os_str().is_empty() {
                // One-time blocking call during startup; acceptable for setup paths.
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    Ok(())
}

// ===================== tests =====================
