//! Free-port discovery for local startup.

use tokio::net::TcpListener;

/// The configured port range is fully occupied.
#[derive(Debug, thiserror::Error)]
#[error("no free port available in range {start}-{end}")]
pub struct NoFreePortError {
    pub start: u16,
    pub end: u16,
}

/// Scan `start..=end` in ascending order and return the first port that
/// accepts a bind on `host`. The probe listener is dropped immediately; the
/// caller's real listener rebinds the port right after. Deterministic lowest
/// available port, no retries, no randomization.
///
/// # Errors
///
/// Returns [`NoFreePortError`] when every candidate in the range refuses to
/// bind.
pub async fn find_free_port(host: &str, start: u16, end: u16) -> Result<u16, NoFreePortError> {
    tracing::info!(host, start, end, "searching for a free port");

    for port in start..=end {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                drop(listener);
                tracing::info!(port, "found free port");
                return Ok(port);
            }
            Err(err) => {
                tracing::debug!(port, error = %err, "port is not available");
            }
        }
    }

    Err(NoFreePortError { start, end })
}
