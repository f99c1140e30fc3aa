//! `SQLite` implementation of the `DeviceStore` port.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Connection, FromRow, Row, SqliteConnection};
use tokio::sync::Mutex;

use zigview_app::ports::{DeviceStore, StoreError};
use zigview_domain::device::DeviceRow;

use crate::error::{classify, connect_error};

/// Joined query: one row per (device, state) pair. The `LIMIT` bounds joined
/// rows, not grouped devices — the aggregator documents and preserves that.
const SELECT_JOINED: &str = "\
SELECT
    d.id,
    d.name,
    d.type,
    d.manufacturername AS manufacturer,
    d.modelid AS model,
    d.swversion AS software_version,
    d.lastseen,
    s.name AS state_name,
    s.value AS state_value
FROM devices d
LEFT JOIN device_states s ON d.id = s.device_id
WHERE d.id IS NOT NULL
ORDER BY d.lastseen DESC, d.id ASC
LIMIT ?";

/// Fallback for databases without the state table. Mirrors the joined query's
/// ordering and limit; carries no state or software-version columns.
const SELECT_BASIC: &str = "\
SELECT id, name, type, manufacturername AS manufacturer, modelid AS model, lastseen
FROM devices
WHERE id IS NOT NULL
ORDER BY lastseen DESC, id ASC
LIMIT ?";

const SELECT_PING: &str = "SELECT 1";

/// Wrapper for decoding joined rows into [`DeviceRow`].
struct JoinedRow(DeviceRow);

impl FromRow<'_, SqliteRow> for JoinedRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(DeviceRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            kind: row.try_get("type")?,
            manufacturer: row.try_get("manufacturer")?,
            model: row.try_get("model")?,
            software_version: row.try_get("software_version")?,
            last_seen: row.try_get("lastseen")?,
            state_name: row.try_get("state_name")?,
            state_value: row.try_get("state_value")?,
        }))
    }
}

/// Wrapper for decoding fallback rows, which lack state and version columns.
struct BasicRow(DeviceRow);

impl FromRow<'_, SqliteRow> for BasicRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(DeviceRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            kind: row.try_get("type")?,
            manufacturer: row.try_get("manufacturer")?,
            model: row.try_get("model")?,
            software_version: None,
            last_seen: row.try_get("lastseen")?,
            state_name: None,
            state_value: None,
        }))
    }
}

/// Read-only store over a deCONZ-style `SQLite` database.
///
/// Holds at most one connection, opened lazily on the first query and reused
/// for the process lifetime. The lock serializes every query — concurrent
/// callers queue, the connection is never shared.
pub struct SqliteDeviceStore {
    options: SqliteConnectOptions,
    conn: Mutex<Option<SqliteConnection>>,
}

impl SqliteDeviceStore {
    /// Point the store at a database file. Nothing is opened until the first
    /// query runs, so a missing file only surfaces as a query-time error.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .busy_timeout(Duration::from_secs(10));
        Self {
            options,
            conn: Mutex::new(None),
        }
    }

    /// Wrap an already-open connection. Used by tests and by callers that
    /// seed an in-memory database through the same connection the store will
    /// keep using.
    #[must_use]
    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            options: SqliteConnectOptions::new(),
            conn: Mutex::new(Some(conn)),
        }
    }

    async fn connection<'a>(
        guard: &'a mut Option<SqliteConnection>,
        options: &SqliteConnectOptions,
    ) -> Result<&'a mut SqliteConnection, StoreError> {
        let conn = match guard.take() {
            Some(conn) => conn,
            None => {
                let conn = SqliteConnection::connect_with(options)
                    .await
                    .map_err(connect_error)?;
                tracing::info!(path = ?options.get_filename(), "connected to device database");
                conn
            }
        };
        Ok(guard.insert(conn))
    }
}

impl DeviceStore for SqliteDeviceStore {
    fn fetch_joined(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send {
        async move {
            let limit = i64::from(limit);
            let mut guard = self.conn.lock().await;
            let conn = Self::connection(&mut guard, &self.options).await?;

            let rows: Vec<JoinedRow> = sqlx::query_as(SELECT_JOINED)
                .bind(limit)
                .fetch_all(conn)
                .await
                .map_err(|err| classify(SELECT_JOINED, limit, err))?;

            Ok(rows.into_iter().map(|row| row.0).collect())
        }
    }

    fn fetch_basic(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send {
        async move {
            let limit = i64::from(limit);
            let mut guard = self.conn.lock().await;
            let conn = Self::connection(&mut guard, &self.options).await?;

            let rows: Vec<BasicRow> = sqlx::query_as(SELECT_BASIC)
                .bind(limit)
                .fetch_all(conn)
                .await
                .map_err(|err| classify(SELECT_BASIC, limit, err))?;

            Ok(rows.into_iter().map(|row| row.0).collect())
        }
    }

    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            let mut guard = self.conn.lock().await;
            let conn = Self::connection(&mut guard, &self.options).await?;

            sqlx::query(SELECT_PING)
                .execute(conn)
                .await
                .map_err(|err| classify(SELECT_PING, 0, err))?;

            Ok(())
        }
    }
}
