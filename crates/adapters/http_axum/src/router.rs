//! Axum router assembly.

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use zigview_app::ports::DeviceStore;

use crate::error::ErrorBody;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api`, serves the dashboard at `/`, and installs
/// a [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem. Unmatched paths get the JSON/HTML split of
/// the API contract.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: DeviceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(crate::dashboard::index::<S>))
        .nest("/api", crate::api::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unmatched-route handler: JSON under `/api/`, rendered page otherwise.
async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::plain("Endpoint not found")),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Html(crate::dashboard::render_page(&[], Some("Page not found"))),
        )
            .into_response()
    }
}
