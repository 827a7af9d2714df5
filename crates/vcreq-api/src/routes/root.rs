//! Service banner and liveness probe.

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}

/// GET /: service banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = String)),
    tag = "service"
)]
async fn banner() -> String {
    format!(
        "vcreq core API {}. Documentation: /v1/api-documentation",
        env!("CARGO_PKG_VERSION")
    )
}

/// GET /health: liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "service"
)]
async fn health() -> &'static str {
    "OK"
}
