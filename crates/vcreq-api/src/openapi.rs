//! # OpenAPI Document
//!
//! Assembled from the utoipa-annotated handlers and served at
//! `/v1/api-documentation`. Configured API target URLs are listed as
//! servers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

use crate::config::AppConfig;
use crate::state::AppState;

/// Path the document is served at.
pub const DOCUMENTATION_PATH: &str = "/v1/api-documentation";

/// Adds the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vcreq Core API",
        description = "Verifiable-credential claims requests for OIDC4VP / SIOP, and DID creation and resolution through pluggable method adapters.\n\nErrors are returned as `{\"message\": string, \"status\": int}` with the HTTP status mirroring `status`.",
        license(name = "Apache-2.0")
    ),
    security(
        ("bearerAuth" = [])
    ),
    paths(
        crate::routes::root::banner,
        crate::routes::root::health,
        crate::routes::did::create_did,
        crate::routes::did::resolve_did,
        crate::routes::claims::merge_claims,
        crate::routes::claims::validate_claims,
    ),
    components(schemas(
        crate::error::ErrorEnvelopeSchema,
        crate::routes::did::CreateDidRequest,
        crate::routes::did::DidResponse,
        crate::routes::did::ResolveDidRequest,
        crate::routes::claims::MergeClaimsRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "service", description = "Banner and health"),
        (name = "did", description = "DID creation and resolution"),
        (name = "oidc", description = "OIDC4VP / SIOP claims requests"),
    )
)]
pub struct ApiDoc;

/// The document for a deployment, with its target URLs as servers.
pub fn api_doc(config: &AppConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !config.api_target_urls.is_empty() {
        doc.servers = Some(
            config
                .api_target_urls
                .iter()
                .map(|url| Server::new(url.as_str()))
                .collect(),
        );
    }
    doc
}

pub fn router() -> Router<AppState> {
    Router::new().route(DOCUMENTATION_PATH, get(openapi_json))
}

/// GET /v1/api-documentation: the OpenAPI document.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc(&state.config))
}
