//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ZigviewError`]
//! at the boundary. The store-level error (with its schema/other split that
//! drives the fallback query) lives next to the port trait in `zigview-app`.

/// A lookup that came back empty.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// What was looked up, e.g. `"Device"`.
    pub entity: &'static str,
    /// The identifier that missed, kept for logging only.
    pub id: String,
}

/// Top-level error for the read path.
#[derive(Debug, thiserror::Error)]
pub enum ZigviewError {
    /// A requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The store failed, after any fallback query was already attempted.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Anything that is neither a lookup miss nor a store failure.
    #[error("internal error: {0}")]
    Internal(String),
}
