//! End-to-end smoke tests for the full zigviewd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, the real
//! store adapter, real service, real cache, real axum router) and exercises
//! the HTTP layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tower::ServiceExt;

use zigview_adapter_http_axum::state::AppState;
use zigview_adapter_http_axum::router;
use zigview_adapter_storage_sqlite_sqlx::SqliteDeviceStore;
use zigview_app::cache::ReadCache;
use zigview_app::ports::{DeviceStore, StoreError};
use zigview_app::services::device_service::DeviceService;
use zigview_domain::device::DeviceRow;

const CREATE_DEVICES: &str = "\
CREATE TABLE devices (
    id INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT,
    manufacturername TEXT,
    modelid TEXT,
    swversion TEXT,
    lastseen TEXT
)";

const CREATE_STATES: &str = "\
CREATE TABLE device_states (
    device_id INTEGER NOT NULL,
    name TEXT,
    value TEXT
)";

/// Counts every store call so tests can observe cache hits and misses.
struct CountingStore {
    inner: SqliteDeviceStore,
    calls: Arc<AtomicUsize>,
}

impl DeviceStore for CountingStore {
    fn fetch_joined(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_joined(limit)
    }

    fn fetch_basic(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DeviceRow>, StoreError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_basic(limit)
    }

    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send {
        self.inner.ping()
    }
}

/// Open an in-memory database and seed it through the one connection the
/// store will keep for its lifetime.
async fn seeded_connection(with_states: bool) -> SqliteConnection {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();

    sqlx::query(CREATE_DEVICES).execute(&mut conn).await.unwrap();
    sqlx::query(
        "INSERT INTO devices (id, name, type, manufacturername, modelid, swversion, lastseen)
         VALUES
            (1, 'Kitchen sensor', 'ZHATemperature', 'LUMI', 'lumi.weather', '0.0.0_0029',
             '2024-01-02T03:04:05Z'),
            (2, NULL, 'ZHASwitch', 'IKEA', 'E1743', '2.3.080', '2024-01-01 00:00:00')",
    )
    .execute(&mut conn)
    .await
    .unwrap();

    if with_states {
        sqlx::query(CREATE_STATES).execute(&mut conn).await.unwrap();
        sqlx::query(
            "INSERT INTO device_states (device_id, name, value) VALUES
                (1, 'temperature', '2150'),
                (1, 'humidity', '4820'),
                (2, 'buttonevent', '1002')",
        )
        .execute(&mut conn)
        .await
        .unwrap();
    }

    conn
}

/// Build a fully-wired router plus the store-call counter behind it.
async fn app_with_counter(with_states: bool) -> (axum::Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = CountingStore {
        inner: SqliteDeviceStore::from_connection(seeded_connection(with_states).await),
        calls: Arc::clone(&calls),
    };

    let state = AppState::new(
        DeviceService::new(store, 50),
        ReadCache::new(Duration::from_secs(300)),
        "2.0.0",
    );
    (router::build(state), calls)
}

async fn app(with_states: bool) -> axum::Router {
    app_with_counter(with_states).await.0
}

async fn get_json(
    app: &axum::Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// ---------------------------------------------------------------------------
// Device API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_devices_with_merged_states() {
    let app = app(true).await;
    let (status, body) = get_json(&app, "/api/devices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    // Device 1 was seen more recently, so it comes first.
    let first = &body["devices"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Kitchen sensor");
    assert_eq!(first["last_seen"], "2024-01-02 03:04:05");
    assert_eq!(first["states"]["temperature"], "2150");
    assert_eq!(first["states"]["humidity"], "4820");

    // Device 2 has a NULL name and gets the synthesized label.
    let second = &body["devices"][1];
    assert_eq!(second["name"], "Device 2");
    assert_eq!(second["states"]["buttonevent"], "1002");
}

#[tokio::test]
async fn should_get_single_device_by_id() {
    let app = app(true).await;
    let (status, body) = get_json(&app, "/api/devices/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["type"], "ZHATemperature");
}

#[tokio::test]
async fn should_return_404_for_missing_device() {
    let app = app(true).await;
    let (status, body) = get_json(&app, "/api/devices/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"error": "Device not found"}));
}

// ---------------------------------------------------------------------------
// Fallback query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_serve_devices_without_a_state_table() {
    let app = app(false).await;
    let (status, body) = get_json(&app, "/api/devices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["devices"][0]["states"], serde_json::json!({}));
    assert_eq!(body["devices"][0]["software_version"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_serve_repeated_reads_from_cache() {
    let (app, calls) = app_with_counter(true).await;

    get_json(&app, "/api/devices").await;
    get_json(&app, "/api/devices").await;
    get_json(&app, "/api/devices/1").await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn should_recompute_after_cache_clear() {
    let (app, calls) = app_with_counter(true).await;

    get_json(&app, "/api/devices").await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cache/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Cache cleared successfully");

    get_json(&app, "/api/devices").await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_healthy_when_database_responds() {
    let app = app(true).await;
    let (status, body) = get_json(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], "2.0.0");
}

#[tokio::test]
async fn should_report_unhealthy_when_database_is_unreachable() {
    let store = SqliteDeviceStore::new(std::path::Path::new("/nonexistent/zll.db"));
    let state = AppState::new(
        DeviceService::new(store, 50),
        ReadCache::new(Duration::from_secs(300)),
        "2.0.0",
    );
    let app = router::build(state);

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

// ---------------------------------------------------------------------------
// Dashboard (SSR) page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_device_page() {
    let response = app(true)
        .await
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Kitchen sensor"));
    assert!(body.contains("Device 2"));
}

#[tokio::test]
async fn should_render_error_banner_when_database_is_unreachable() {
    let store = SqliteDeviceStore::new(std::path::Path::new("/nonexistent/zll.db"));
    let state = AppState::new(
        DeviceService::new(store, 50),
        ReadCache::new(Duration::from_secs(300)),
        "2.0.0",
    );
    let app = router::build(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // The page itself still renders.
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Failed to load device data"));
    assert!(body.contains("No devices found"));
}

// ---------------------------------------------------------------------------
// Error shaping for unknown routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_shape_unknown_api_route_as_json() {
    let app = app(true).await;
    let (status, body) = get_json(&app, "/api/bogus").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn should_shape_unknown_page_as_html() {
    let response = app(true)
        .await
        .oneshot(
            Request::builder()
                .uri("/bogus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Page not found"));
}
