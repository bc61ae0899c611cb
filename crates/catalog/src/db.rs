use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::config::Config;

const CATALOG_DB_FILENAME: &str = "catalog.db";

/// Handle on the catalog database.
///
/// Constructed once per command and handed by reference to whatever needs the
/// store. Call [`Store::close`] when the command is done, whether it
/// succeeded or not.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
    root: PathBuf,
}

impl Store {
    /// Open the catalog database described by `config`, running migrations as needed.
    ///
    /// `NUTRI_DB_PATH` wins over `database.path` from the config file.
    pub async fn open(config: &Config) -> Result<Self> {
        let db_root = match std::env::var("NUTRI_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => config.database.path.clone().context(
                "NUTRI_DB_PATH environment variable or database.path config must be set",
            )?,
        };

        let (pool, root) = init_pool(db_root).await?;
        Ok(Self { pool, root })
    }

    /// Wrap an existing pool. Used by tests with in-memory databases.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            root: PathBuf::new(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Directory the database file lives in
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Close every pooled connection.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("catalog store closed");
    }
}

/// Initialize the catalog database, running migrations as needed.
pub async fn init_pool(db_root: PathBuf) -> Result<(SqlitePool, PathBuf)> {
    let db_root_path = normalize_path(db_root)?;
    std::fs::create_dir_all(&db_root_path)
        .with_context(|| format!("failed to create DB path: {}", db_root_path.display()))?;

    let catalog_db_path = db_root_path.join(CATALOG_DB_FILENAME);
    let db_uri = format!("sqlite://{}", catalog_db_path.to_string_lossy());

    let connect_options = SqliteConnectOptions::from_str(&db_uri)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .with_context(|| format!("failed to open {}", catalog_db_path.display()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run catalog migrations")?;

    Ok((pool, db_root_path))
}

pub(crate) fn normalize_path<P: Into<PathBuf>>(path: P) -> Result<PathBuf> {
    let path = path.into();
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = std::env::current_dir().context("failed to read current working directory")?;
    Ok(cwd.join(path))
}
