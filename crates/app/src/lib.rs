//! # zigview-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`DeviceStore` port** that the storage adapter implements,
//!   including the schema/other error split that drives the fallback query
//! - Provide the **`DeviceService`** use-case: run the joined device query,
//!   fall back once on a schema mismatch, and group rows into device records
//! - Provide the **`ReadCache`**, a TTL cache wrapping the read path
//!
//! ## Dependency rule
//! Depends on `zigview-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod cache;
pub mod ports;
pub mod services;
