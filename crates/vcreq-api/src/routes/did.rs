//! # DID Endpoints
//!
//! Forward create and resolve requests to the [`DidDispatcher`] held in
//! [`AppState`]. Adapter calls are synchronous and may block on a key
//! store or registry, so they run on the blocking pool.
//!
//! - `POST /v1/did/create`: create a DID of a method.
//! - `POST /v1/did/resolve`: resolve a DID to its document.
//!
//! [`DidDispatcher`]: vcreq_did::DidDispatcher

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vcreq_core::{Did, DidMethod, VcreqError};
use vcreq_did::{DidCreateRequest, DidOptions, DidServiceError};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for DID creation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDidRequest {
    /// DID method tag: `key`, `web`, `ebsi`, `cheqd` or `jwk`.
    #[schema(value_type = String, example = "key")]
    pub method: DidMethod,
    /// Existing key to bind. Generated when absent.
    pub key_alias: Option<String>,
    /// Method-specific options, e.g. `{"ebsiCreate": {"version": 1}}`.
    #[schema(value_type = Option<Object>)]
    pub options: Option<DidOptions>,
}

impl From<CreateDidRequest> for DidCreateRequest {
    fn from(req: CreateDidRequest) -> Self {
        Self {
            method: req.method,
            key_alias: req.key_alias,
            options: req.options,
        }
    }
}

/// Response body for DID creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DidResponse {
    #[schema(example = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")]
    pub did: String,
}

/// Request body for DID resolution.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveDidRequest {
    #[schema(value_type = String, example = "did:ebsi:zcGvqgZTHCtkjgtcKRL7H8k")]
    pub did: Did,
    /// Method-specific options, e.g. `{"ebsiResolve": {"isRaw": true}}`.
    #[schema(value_type = Option<Object>)]
    pub options: Option<DidOptions>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/did/create", post(create_did))
        .route("/v1/did/resolve", post(resolve_did))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/did/create: create a DID.
#[utoipa::path(
    post,
    path = "/v1/did/create",
    request_body = CreateDidRequest,
    responses(
        (status = 200, description = "DID created", body = DidResponse),
        (status = 400, description = "Invalid request, options or method", body = crate::error::ErrorEnvelopeSchema),
        (status = 500, description = "DID service failure", body = crate::error::ErrorEnvelopeSchema),
    ),
    tag = "did"
)]
async fn create_did(
    State(state): State<AppState>,
    body: Result<Json<CreateDidRequest>, JsonRejection>,
) -> Result<Json<DidResponse>, AppError> {
    let request = DidCreateRequest::from(extract_json(body)?);
    tracing::info!(method = %request.method, "creating DID");

    let dids = state.dids.clone();
    let did = run_blocking("DID create", move || dids.create(&request)).await?;
    Ok(Json(DidResponse {
        did: did.to_string(),
    }))
}

/// POST /v1/did/resolve: resolve a DID to its DID document.
#[utoipa::path(
    post,
    path = "/v1/did/resolve",
    request_body = ResolveDidRequest,
    responses(
        (status = 200, description = "DID document", body = serde_json::Value),
        (status = 400, description = "Malformed DID or invalid options", body = crate::error::ErrorEnvelopeSchema),
        (status = 404, description = "No adapter for the DID method", body = crate::error::ErrorEnvelopeSchema),
    ),
    tag = "did"
)]
async fn resolve_did(
    State(state): State<AppState>,
    body: Result<Json<ResolveDidRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ResolveDidRequest { did, options } = extract_json(body)?;

    let dids = state.dids.clone();
    let document = run_blocking("DID resolve", move || dids.resolve(&did, options.as_ref())).await?;
    Ok(Json(document))
}

async fn run_blocking<T, F>(what: &'static str, call: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DidServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| VcreqError::internal(format!("{what} task failed: {e}")))?
        .map_err(AppError::from)
}
