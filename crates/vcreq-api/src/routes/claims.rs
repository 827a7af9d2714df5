//! # Claims Request Endpoints
//!
//! - `POST /v1/oidc/claims`: validate a claims request and merge it into a
//!   base claims object, returning the object to transmit.
//! - `POST /v1/oidc/claims/validate`: validate only.
//!
//! Both reject an empty request. `strict` additionally rejects credential
//! formats outside the recognized set.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use vcreq_oidc::{ClaimsRequest, ProtocolObject, ValidationMode};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_query};
use crate::state::AppState;

/// Request body for the merge endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MergeClaimsRequest {
    /// The verifiable-credential claims request.
    #[schema(value_type = Object, example = json!({
        "credentials": [{"type": "VerifiableId", "format": "jwt_vc"}]
    }))]
    pub claims: ClaimsRequest,
    /// Base claims object (`userinfo`, `id_token`, ...). Defaults to `{}`.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub base: Option<ProtocolObject>,
    /// Reject unrecognized credential formats.
    #[serde(default)]
    pub strict: bool,
}

/// Query parameters of the validate endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateClaimsParams {
    /// Reject unrecognized credential formats.
    #[serde(default)]
    pub strict: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/oidc/claims", post(merge_claims))
        .route("/v1/oidc/claims/validate", post(validate_claims))
}

/// POST /v1/oidc/claims: validate and merge a claims request.
#[utoipa::path(
    post,
    path = "/v1/oidc/claims",
    request_body = MergeClaimsRequest,
    responses(
        (status = 200, description = "Merged protocol claims object", body = serde_json::Value),
        (status = 400, description = "Invalid or empty claims request", body = crate::error::ErrorEnvelopeSchema),
    ),
    tag = "oidc"
)]
async fn merge_claims(
    body: Result<Json<MergeClaimsRequest>, JsonRejection>,
) -> Result<Json<ProtocolObject>, AppError> {
    let MergeClaimsRequest {
        claims,
        base,
        strict,
    } = extract_json(body)?;

    check(&claims, ValidationMode::from_strict(strict))?;
    let merged = claims.to_protocol_object(base.unwrap_or_default())?;
    Ok(Json(merged))
}

/// POST /v1/oidc/claims/validate: validate a claims request.
#[utoipa::path(
    post,
    path = "/v1/oidc/claims/validate",
    params(ValidateClaimsParams),
    request_body = serde_json::Value,
    responses(
        (status = 204, description = "Claims request is valid"),
        (status = 400, description = "Invalid or empty claims request", body = crate::error::ErrorEnvelopeSchema),
    ),
    tag = "oidc"
)]
async fn validate_claims(
    params: Result<Query<ValidateClaimsParams>, QueryRejection>,
    body: Result<Json<ClaimsRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let params = extract_query(params)?;
    let claims = extract_json(body)?;

    check(&claims, ValidationMode::from_strict(params.strict))?;
    Ok(StatusCode::NO_CONTENT)
}

fn check(claims: &ClaimsRequest, mode: ValidationMode) -> Result<(), AppError> {
    claims.ensure_not_empty()?;
    claims.validate(mode)?;
    Ok(())
}
