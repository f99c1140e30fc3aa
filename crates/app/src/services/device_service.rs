//! Device service — the aggregation read path.
//!
//! Runs the joined device query, falls back exactly once to the basic query
//! when the joined one hits a schema mismatch (a deCONZ database without the
//! state table), and folds the raw rows into one record per device.

use std::collections::HashMap;

use zigview_domain::device::{Device, DeviceRow};
use zigview_domain::error::ZigviewError;

use crate::ports::{DeviceStore, StoreError};

/// Application service for the device read path.
pub struct DeviceService<S> {
    store: S,
    max_devices: u32,
}

impl<S: DeviceStore> DeviceService<S> {
    /// Create a new service backed by the given store.
    ///
    /// `max_devices` is the row limit handed to the store queries. It bounds
    /// joined rows, not grouped devices, so a chatty device can crowd others
    /// out of a full page — the store's documented limit semantics.
    pub fn new(store: S, max_devices: u32) -> Self {
        Self { store, max_devices }
    }

    /// List devices, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ZigviewError::Storage`] when the joined query fails for a
    /// non-schema reason, or when the fallback query fails too.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(&self) -> Result<Vec<Device>, ZigviewError> {
        let rows = match self.store.fetch_joined(self.max_devices).await {
            Ok(rows) => rows,
            Err(StoreError::Schema(source)) => {
                tracing::warn!(
                    error = %source,
                    "joined device query hit a schema mismatch, falling back to basic query"
                );
                self.store.fetch_basic(self.max_devices).await?
            }
            Err(err) => return Err(err.into()),
        };

        let devices = group_rows(rows);
        tracing::info!(count = devices.len(), "retrieved devices from store");
        Ok(devices)
    }

    /// Probe store connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`ZigviewError::Storage`] when the probe query fails.
    pub async fn health_check(&self) -> Result<(), ZigviewError> {
        self.store.ping().await.map_err(ZigviewError::from)
    }
}

/// Fold joined rows into one record per device id, preserving first-seen
/// order. Scalar fields come from the first row of a group; every row of the
/// group contributes its state pair when both halves are present.
fn group_rows(rows: Vec<DeviceRow>) -> Vec<Device> {
    let mut devices: Vec<Device> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.id).or_insert_with(|| {
            devices.push(Device::from_row(&row));
            devices.len() - 1
        });
        if let (Some(name), Some(value)) = (row.state_name, row.state_value) {
            devices[slot].merge_state(name, value);
        }
    }

    devices
}
