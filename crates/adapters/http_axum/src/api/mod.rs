//! JSON REST API handler modules.

pub mod cache;
pub mod devices;
pub mod health;

use axum::Router;
use axum::routing::{get, post};

use zigview_app::ports::DeviceStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: DeviceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/devices", get(devices::list::<S>))
        .route("/devices/{id}", get(devices::get::<S>))
        .route("/health", get(health::check::<S>))
        .route("/cache/clear", post(cache::clear::<S>))
}
