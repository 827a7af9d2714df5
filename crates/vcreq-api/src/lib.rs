//! # vcreq-api: HTTP Adapter
//!
//! A thin axum layer over the vcreq core. Handlers parse, call
//! `validate` / `to_protocol_object` / the DID dispatcher, and map every
//! failure through the error envelope. No business logic lives here.
//!
//! ## API Surface
//!
//! | Route | Module |
//! |---|---|
//! | `GET /`, `GET /health` | [`routes::root`] |
//! | `POST /v1/did/create`, `POST /v1/did/resolve` | [`routes::did`] |
//! | `POST /v1/oidc/claims`, `POST /v1/oidc/claims/validate` | [`routes::claims`] |
//! | `GET /v1/api-documentation` | [`openapi`] |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
///
/// CORS accepts any origin, matching deployments where wallets and web
/// verifiers call the API directly from the browser.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::did::router())
        .merge(routes::claims::router())
        .merge(openapi::router())
        .fallback(error::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
