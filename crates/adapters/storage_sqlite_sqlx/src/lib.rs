//! # zigview-adapter-storage-sqlite-sqlx
//!
//! `SQLite` read adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `DeviceStore` port defined in `zigview-app::ports::store`
//! - Hold exactly one lazily-opened connection to the external deCONZ-style
//!   database, serialized behind a lock — no pool, no write path
//! - Map rows to domain `DeviceRow` values and classify failures into the
//!   schema/other split the aggregator's fallback branch relies on
//!
//! ## Dependency rule
//! Depends on `zigview-app` (for the port trait) and `zigview-domain` (for
//! row types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod error;
pub mod store;

pub use store::SqliteDeviceStore;
