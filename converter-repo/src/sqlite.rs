//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use converter_types::{
    ConversionId, ConversionRecord, ConversionRepository, NewConversion, RepoError,
};

use crate::types::{
    SqliteConversionRow, count_from_db, map_db_error, offset_to_db, sqlite_timestamp,
};

const MIGRATION: &str = include_str!("../migrations/0001_create_conversions.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own database.
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
        if in_memory {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        sqlx::query(MIGRATION).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ConversionRepository for SqliteRepo {
    async fn record_conversion(&self, new: NewConversion) -> Result<ConversionRecord, RepoError> {
        let now = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"INSERT INTO conversions (source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&new.source_currency)
        .bind(&new.target_currency)
        .bind(new.amount)
        .bind(new.converted_amount)
        .bind(new.exchange_rate)
        .bind(sqlite_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        let id = ConversionId::new(result.last_insert_rowid());
        Ok(new.into_record(id, now))
    }

    async fn list_recent(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let rows: Vec<SqliteConversionRow> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp
               FROM conversions
               ORDER BY timestamp DESC, id DESC
               LIMIT ? OFFSET ?"#,
        )
        .bind(i64::from(limit))
        .bind(offset_to_db(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(SqliteConversionRow::into_domain)
            .collect()
    }

    async fn count_conversions(&self) -> Result<u64, RepoError> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM conversions"#)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        count_from_db(total)
    }

    async fn list_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        let rows: Vec<SqliteConversionRow> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp
               FROM conversions
               ORDER BY timestamp DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(SqliteConversionRow::into_domain)
            .collect()
    }
}
