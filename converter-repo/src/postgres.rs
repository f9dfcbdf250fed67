//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use converter_types::{
    ConversionId, ConversionRecord, ConversionRepository, NewConversion, RepoError,
};

use crate::types::{PgConversionRow, count_from_db, map_db_error, offset_to_db};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_conversions_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ConversionRepository for PostgresRepo {
    async fn record_conversion(&self, new: NewConversion) -> Result<ConversionRecord, RepoError> {
        let now = Utc::now().trunc_subsecs(6);

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO conversions (source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(&new.source_currency)
        .bind(&new.target_currency)
        .bind(new.amount)
        .bind(new.converted_amount)
        .bind(new.exchange_rate)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(new.into_record(ConversionId::new(id), now))
    }

    async fn list_recent(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let rows: Vec<PgConversionRow> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp
               FROM conversions
               ORDER BY timestamp DESC, id DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(i64::from(limit))
        .bind(offset_to_db(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PgConversionRow::into_domain).collect())
    }

    async fn count_conversions(&self) -> Result<u64, RepoError> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM conversions"#)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        count_from_db(total)
    }

    async fn list_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        let rows: Vec<PgConversionRow> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, amount, converted_amount, exchange_rate, timestamp
               FROM conversions
               ORDER BY timestamp DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PgConversionRow::into_domain).collect())
    }
}
