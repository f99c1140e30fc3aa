//! # zigview-domain
//!
//! Pure domain model for the zigview device monitoring service.
//!
//! ## Responsibilities
//! - Define the **Device** record (aggregated inventory + state view) and the
//!   raw **DeviceRow** shape read from the store
//! - Timestamp normalization rules for the `lastseen` column
//! - Error conventions shared across the workspace
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
pub mod time;
