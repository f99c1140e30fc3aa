//! Device — an aggregated view of one Zigbee device and its reported states.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::time;

/// One raw row as read from the device table, optionally joined against the
/// per-device state table. A device with several states produces several rows
/// sharing the same `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    /// Store-assigned device identifier, the grouping key.
    pub id: i64,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub software_version: Option<String>,
    pub last_seen: Option<String>,
    /// State name from the joined state table, absent for fallback rows.
    pub state_name: Option<String>,
    /// State value from the joined state table, absent for fallback rows.
    pub state_value: Option<String>,
}

/// Aggregated device record as exposed by the API and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: i64,
    /// Store name, or a synthesized `Device {id}` label when absent.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub software_version: Option<String>,
    /// Normalized to `YYYY-MM-DD HH:MM:SS`; unparseable store values pass
    /// through unchanged.
    pub last_seen: Option<String>,
    /// State name to state value, only pairs that were non-null in the store.
    pub states: BTreeMap<String, String>,
}

impl Device {
    /// Build a record from the scalar fields of the first row seen for an id.
    ///
    /// State columns on `row` are ignored here; callers merge them separately
    /// so that every row of a group contributes, not just the first.
    #[must_use]
    pub fn from_row(row: &DeviceRow) -> Self {
        Self {
            id: row.id,
            name: row
                .name
                .clone()
                .unwrap_or_else(|| format!("Device {}", row.id)),
            kind: row.kind.clone(),
            manufacturer: row.manufacturer.clone(),
            model: row.model.clone(),
            software_version: row.software_version.clone(),
            last_seen: row.last_seen.as_deref().map(time::normalize_timestamp),
            states: BTreeMap::new(),
        }
    }

    /// Merge one state pair into the record. Later rows win on duplicate
    /// state names.
    pub fn merge_state(&mut self, name: String, value: String) {
        self.states.insert(name, value);
    }
}
