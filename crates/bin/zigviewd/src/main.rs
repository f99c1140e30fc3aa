//! # zigviewd — the device viewer daemon
//!
//! Composition root that wires the storage adapter, the aggregation service,
//! the read cache, and the axum router together, then binds the first free
//! port in the configured range and serves.
//!
//! ## Responsibilities
//! - Resolve configuration from the environment and validate it
//! - Initialize the tracing subscriber
//! - Construct the store adapter and application services
//! - Build the axum router, injecting the shared state
//! - Probe for a free port and serve
//!
//! Exit code 1 on fatal configuration or startup failure; a missing database
//! file only degrades the viewer, it does not stop it.

mod config;
mod logging;
mod net;

use std::time::Duration;

use zigview_adapter_http_axum::{router, state::AppState};
use zigview_adapter_storage_sqlite_sqlx::SqliteDeviceStore;
use zigview_app::cache::ReadCache;
use zigview_app::services::device_service::DeviceService;

use crate::config::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    logging::init(&config.log_filter);

    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "configuration validation failed");
        return Err(err.into());
    }
    if let Some(warning) = config.database_warning() {
        tracing::warn!("{warning}");
    }

    // Storage, service, cache
    let store = SqliteDeviceStore::new(&config.db_path);
    let service = DeviceService::new(store, config.max_devices);
    let cache = ReadCache::new(Duration::from_secs(config.cache_ttl_secs));

    // HTTP
    let state = AppState::new(service, cache, VERSION);
    let app = router::build(state);

    let port = net::find_free_port(&config.host, config.port_start, config.port_end).await?;
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), port)).await?;

    tracing::info!(
        host = %config.host,
        port,
        database = %config.db_path.display(),
        debug = config.debug,
        "starting zigviewd"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
