//! Database row structs and error mapping shared by the adapters.

use sqlx::FromRow;

use converter_types::{ConversionId, ConversionRecord, RepoError};

/// Maps a driver error, recognising unique-key violations.
pub fn map_db_error(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Duplicate(db.message().to_string())
        }
        sqlx::Error::RowNotFound => RepoError::NotFound,
        _ => RepoError::Database(err.to_string()),
    }
}

/// Converts a stored count, which the drivers report as `i64`.
pub fn count_from_db(total: i64) -> Result<u64, RepoError> {
    u64::try_from(total).map_err(|_| RepoError::Database(format!("Negative row count: {total}")))
}

/// Offsets are unsigned at the API but `BIGINT` in SQL.
pub fn offset_to_db(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row from PostgreSQL (`TIMESTAMPTZ` decodes natively).
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgConversionRow {
    pub id: i64,
    pub source_currency: String,
    pub target_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl PgConversionRow {
    pub fn into_domain(self) -> ConversionRecord {
        ConversionRecord {
            id: ConversionId::new(self.id),
            source_currency: self.source_currency,
            target_currency: self.target_currency,
            amount: self.amount,
            converted_amount: self.converted_amount,
            exchange_rate: self.exchange_rate,
            timestamp: self.timestamp,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row from SQLite (timestamp stored as RFC 3339 text).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteConversionRow {
    pub id: i64,
    pub source_currency: String,
    pub target_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub timestamp: String,
}

#[cfg(feature = "sqlite")]
impl SqliteConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let timestamp = chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(ConversionRecord {
            id: ConversionId::new(self.id),
            source_currency: self.source_currency,
            target_currency: self.target_currency,
            amount: self.amount,
            converted_amount: self.converted_amount,
            exchange_rate: self.exchange_rate,
            timestamp,
        })
    }
}

/// Fixed-width UTC text so lexical order matches chronological order.
#[cfg(feature = "sqlite")]
pub fn sqlite_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
