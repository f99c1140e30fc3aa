//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use zigview_app::ports::DeviceStore;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthyBody {
    status: &'static str,
    database: &'static str,
    timestamp: String,
    version: &'static str,
}

#[derive(Serialize)]
struct UnhealthyBody {
    status: &'static str,
    error: String,
    timestamp: String,
}

/// `GET /api/health`
///
/// Probes the store directly (`SELECT 1`), bypassing the device cache — a
/// cached success must not mask a dead database.
pub async fn check<S>(State(state): State<AppState<S>>) -> Response
where
    S: DeviceStore + Send + Sync + 'static,
{
    match state.devices.health_check().await {
        Ok(()) => Json(HealthyBody {
            status: "healthy",
            database: "connected",
            timestamp: Utc::now().to_rfc3339(),
            version: state.version,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyBody {
                    status: "unhealthy",
                    error: err.to_string(),
                    timestamp: Utc::now().to_rfc3339(),
                }),
            )
                .into_response()
        }
    }
}
