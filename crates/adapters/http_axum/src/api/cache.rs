//! Cache management endpoint.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use zigview_app::ports::DeviceStore;

use crate::state::AppState;

/// Body of `POST /api/cache/clear`.
#[derive(Serialize)]
pub struct CacheClearedResponse {
    pub message: &'static str,
    pub timestamp: String,
}

/// `POST /api/cache/clear` — drop every cached entry so the next read
/// recomputes from the store.
pub async fn clear<S>(State(state): State<AppState<S>>) -> Json<CacheClearedResponse>
where
    S: DeviceStore + Send + Sync + 'static,
{
    state.cache.clear().await;
    tracing::info!("device cache cleared");

    Json(CacheClearedResponse {
        message: "Cache cleared successfully",
        timestamp: Utc::now().to_rfc3339(),
    })
}
