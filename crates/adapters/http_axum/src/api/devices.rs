//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::Serialize;

use zigview_app::ports::DeviceStore;
use zigview_domain::device::Device;
use zigview_domain::error::NotFoundError;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/devices`.
#[derive(Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
    pub count: usize,
    pub timestamp: String,
}

/// `GET /api/devices`
pub async fn list<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<DeviceListResponse>, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
{
    let devices = state.cached_devices().await?;
    Ok(Json(DeviceListResponse {
        count: devices.len(),
        devices,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// `GET /api/devices/{id}`
///
/// Looks the device up in the cached list, same as the original read path —
/// a detail request never bypasses the cache.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Device>, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
{
    let devices = state.cached_devices().await?;
    let device = devices.into_iter().find(|device| device.id == id);

    device.map(Json).ok_or_else(|| {
        ApiError::from(zigview_domain::error::ZigviewError::from(NotFoundError {
            entity: "Device",
            id: id.to_string(),
        }))
    })
}
