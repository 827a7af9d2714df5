//! # DID Service Adapter Interface
//!
//! The [`DidService`] trait abstracts over a DID method implementation.
//! Production deployments implement it against a key store and the
//! method's registry; development and tests use
//! [`MockDidService`](crate::mock::MockDidService). One adapter serves one
//! [`DidMethod`], and [`DidDispatcher`](crate::dispatch::DidDispatcher)
//! selects between them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vcreq_core::{Did, DidMethod, UnsupportedMethodError, ValidationError, VcreqError};

use crate::options::DidOptions;

/// Errors from DID service operations.
#[derive(Debug, thiserror::Error)]
pub enum DidServiceError {
    /// The request or its options failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No adapter handles the method.
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethodError),

    /// The request was well-formed but unusable, e.g. an unknown key alias.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// The backing key store or registry failed.
    #[error("DID backend failure ({adapter}): {reason}")]
    Backend {
        /// Name of the failing adapter.
        adapter: String,
        /// Description of the failure.
        reason: String,
    },
}

impl From<DidServiceError> for VcreqError {
    fn from(err: DidServiceError) -> Self {
        match err {
            DidServiceError::Validation(e) => VcreqError::Validation(e),
            DidServiceError::UnsupportedMethod(e) => VcreqError::UnsupportedMethod(e),
            DidServiceError::InvalidArgument { reason } => VcreqError::InvalidArgument(reason),
            backend @ DidServiceError::Backend { .. } => VcreqError::Internal(backend.to_string()),
        }
    }
}

/// A request to create a DID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidCreateRequest {
    pub method: DidMethod,
    /// Existing key to bind. When absent the service generates one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DidOptions>,
}

impl DidCreateRequest {
    pub fn new(method: DidMethod) -> Self {
        Self {
            method,
            key_alias: None,
            options: None,
        }
    }

    pub fn with_key_alias(mut self, key_alias: impl Into<String>) -> Self {
        self.key_alias = Some(key_alias.into());
        self
    }

    pub fn with_options(mut self, options: impl Into<DidOptions>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// Adapter trait for one DID method.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe so adapters can be
/// selected at runtime.
///
/// Options reaching an adapter through the dispatcher are already validated
/// and known to apply to the adapter's method and the operation.
pub trait DidService: Send + Sync {
    /// The method this adapter implements.
    fn method(&self) -> DidMethod;

    /// Create a new DID of [`DidService::method`].
    fn create(&self, request: &DidCreateRequest) -> Result<Did, DidServiceError>;

    /// Resolve a DID to its DID document.
    fn resolve(&self, did: &Did, options: Option<&DidOptions>) -> Result<Value, DidServiceError>;

    /// Human-readable name of the implementation (e.g. "MockDidService").
    fn adapter_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DidEbsiCreateOptions;
    use serde_json::json;
    use vcreq_core::{to_envelope, DidOperation};

    #[test]
    fn create_request_wire_shape() {
        let request = DidCreateRequest::new(DidMethod::Ebsi)
            .with_key_alias("k-1")
            .with_options(DidEbsiCreateOptions { version: 1 });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"method": "ebsi", "keyAlias": "k-1", "options": {"ebsiCreate": {"version": 1}}})
        );

        let minimal: DidCreateRequest = serde_json::from_value(json!({"method": "key"})).unwrap();
        assert_eq!(minimal, DidCreateRequest::new(DidMethod::Key));
    }

    #[test]
    fn unknown_method_in_request_is_rejected() {
        assert!(serde_json::from_value::<DidCreateRequest>(json!({"method": "iota"})).is_err());
    }

    #[test]
    fn errors_convert_to_matching_envelopes() {
        let cases: Vec<(DidServiceError, u16)> = vec![
            (ValidationError::InvalidDid("x".to_string()).into(), 400),
            (
                UnsupportedMethodError::new("jwk")
                    .during(DidOperation::Resolve)
                    .into(),
                404,
            ),
            (
                DidServiceError::InvalidArgument {
                    reason: "unknown key alias".to_string(),
                },
                400,
            ),
            (
                DidServiceError::Backend {
                    adapter: "Test".to_string(),
                    reason: "registry unreachable".to_string(),
                },
                500,
            ),
        ];
        for (err, status) in cases {
            let envelope = to_envelope(&VcreqError::from(err));
            assert_eq!(envelope.status, status, "{}", envelope.message);
        }
    }

    #[test]
    fn backend_message_names_adapter() {
        let err = VcreqError::from(DidServiceError::Backend {
            adapter: "EbsiRegistry".to_string(),
            reason: "timeout".to_string(),
        });
        assert_eq!(
            to_envelope(&err).message,
            "DID backend failure (EbsiRegistry): timeout"
        );
    }
}
