//! # zigview-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** (`/api/devices`, `/api/devices/{id}`,
//!   `/api/health`, `/api/cache/clear`)
//! - Serve the **server-side-rendered dashboard** at `/` — complete HTML,
//!   zero JavaScript, `<meta http-equiv="refresh">` for live updates
//! - Route every device read through the TTL cache (driving adapter)
//! - Shape failures by path: JSON error bodies with a `type` discriminator
//!   under `/api/`, inline error banners on rendered pages everywhere else
//!
//! ## Dependency rule
//! Depends on `zigview-app` (for the port trait, service, and cache) and
//! `zigview-domain` (for response mapping). Never leaks axum types into the
//! domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
