//! Store port — read-only access to the device database.

use std::future::Future;

use zigview_domain::device::DeviceRow;
use zigview_domain::error::ZigviewError;

/// Errors reported by a [`DeviceStore`].
///
/// The split is the fallback contract: a [`StoreError::Schema`] result from
/// the joined query means the state table (or one of its columns) does not
/// exist in this database, and the caller retries with the basic query.
/// Every other failure is final. This keeps the fallback decision an explicit
/// branch on a result value rather than error-type dispatch.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The query referenced a missing table or column.
    #[error("schema mismatch in store query")]
    Schema(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connection failure or any other query error.
    #[error("store query failed")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for ZigviewError {
    fn from(err: StoreError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Read-only port over the embedded device database.
///
/// Implementations serialize all query execution internally; callers may be
/// concurrent but reads are strictly sequential underneath.
pub trait DeviceStore {
    /// Fetch device rows joined against the per-device state table, ordered
    /// by last-seen descending then id ascending, limited to `limit` joined
    /// rows (the limit applies before grouping).
    fn fetch_joined(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send;

    /// Fetch device rows from the device table alone, same ordering and
    /// limit, with no state or software-version columns. Used as the one-shot
    /// fallback when [`DeviceStore::fetch_joined`] hits a schema mismatch.
    fn fetch_basic(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send;

    /// Cheap connectivity probe (`SELECT 1`).
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
