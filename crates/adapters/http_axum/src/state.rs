//! Shared application state for axum handlers.

use std::sync::Arc;

use zigview_app::cache::ReadCache;
use zigview_app::ports::DeviceStore;
use zigview_app::services::device_service::DeviceService;
use zigview_domain::device::Device;
use zigview_domain::error::ZigviewError;

/// Cache key for the one wrapped operation.
const DEVICES_KEY: &str = "list_devices";

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the store itself does not need to be `Clone` —
/// only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Device aggregation service.
    pub devices: Arc<DeviceService<S>>,
    /// TTL cache wrapping [`DeviceService::list_devices`].
    pub cache: Arc<ReadCache<Vec<Device>>>,
    /// Version string reported by the health endpoint.
    pub version: &'static str,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            devices: Arc::clone(&self.devices),
            cache: Arc::clone(&self.cache),
            version: self.version,
        }
    }
}

impl<S> AppState<S>
where
    S: DeviceStore + Send + Sync + 'static,
{
    /// Create the state from a service and its cache.
    pub fn new(
        devices: DeviceService<S>,
        cache: ReadCache<Vec<Device>>,
        version: &'static str,
    ) -> Self {
        Self {
            devices: Arc::new(devices),
            cache: Arc::new(cache),
            version,
        }
    }

    /// The cached read path: every page and API listing goes through here so
    /// the aggregation query runs at most once per TTL window.
    ///
    /// # Errors
    ///
    /// Propagates [`ZigviewError`] from the aggregation call; failures are
    /// never cached.
    pub async fn cached_devices(&self) -> Result<Vec<Device>, ZigviewError> {
        let service = Arc::clone(&self.devices);
        self.cache
            .get_or_compute(DEVICES_KEY, move || async move {
                service.list_devices().await
            })
            .await
    }
}
