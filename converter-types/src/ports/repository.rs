//! Repository port trait.
//!
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use std::sync::Arc;

use crate::domain::{ConversionRecord, NewConversion};
use crate::error::RepoError;

/// Append-only store of conversion records.
///
/// Concurrent inserts must not corrupt the record set; there is no
/// update or delete path.
#[async_trait::async_trait]
pub trait ConversionRepository: Send + Sync + 'static {
    /// Appends a record, assigning its `id` and `timestamp`.
    async fn record_conversion(&self, new: NewConversion) -> Result<ConversionRecord, RepoError>;

    /// Reads up to `limit` records, newest first, skipping `offset`.
    async fn list_recent(&self, limit: u32, offset: u64)
    -> Result<Vec<ConversionRecord>, RepoError>;

    /// Counts all stored records.
    async fn count_conversions(&self) -> Result<u64, RepoError>;

    /// Reads every record, newest first.
    async fn list_all(&self) -> Result<Vec<ConversionRecord>, RepoError>;
}

#[async_trait::async_trait]
impl<R: ConversionRepository + ?Sized> ConversionRepository for Arc<R> {
    async fn record_conversion(&self, new: NewConversion) -> Result<ConversionRecord, RepoError> {
        (**self).record_conversion(new).await
    }

    async fn list_recent(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        (**self).list_recent(limit, offset).await
    }

    async fn count_conversions(&self) -> Result<u64, RepoError> {
        (**self).count_conversions().await
    }

    async fn list_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        (**self).list_all().await
    }
}
