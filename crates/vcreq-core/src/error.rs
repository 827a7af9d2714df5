//! # Error Hierarchy
//!
//! Structured error types for vcreq, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every operation in the core is pure and deterministic, so none of these
//! errors is retryable. Each one maps to exactly one transport envelope
//! (see [`crate::envelope`]).

use thiserror::Error;

use crate::identity::{DidMethod, DidOperation};

/// Top-level error type for vcreq.
#[derive(Error, Debug)]
pub enum VcreqError {
    /// A conditional-field rule or option constraint was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input could not be parsed into the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An argument was well-formed but refers to something unusable
    /// (for example an unknown key alias handed to a DID service).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An external type failed to serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// No handler exists for the requested DID method.
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethodError),

    /// Anything unanticipated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VcreqError {
    /// Wrap a parse failure as [`VcreqError::MalformedInput`].
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedInput(err.to_string())
    }

    /// Wrap an unanticipated failure as [`VcreqError::Internal`].
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Validation errors for claims requests and DID options.
///
/// Carries enough context (the offending field, method, or index) for a
/// caller to fix the request without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A credential claim names neither `type` nor `manifest_id`.
    #[error("credential claim must name a `type` or a `manifest_id`; neither is present")]
    MissingIdentifier,

    /// A credential claim names both `type` and `manifest_id`.
    #[error("credential claim must name exactly one of `type` or `manifest_id`; both are present")]
    AmbiguousIdentifier,

    /// Strict validation met a credential format outside the recognized set.
    #[error("unsupported credential format: \"{0}\" (expected jwt_vc or ldp_vc)")]
    UnsupportedFormat(String),

    /// A claims request carries neither `vp_token` nor `credentials`.
    #[error("claims request is empty: expected `vp_token` or at least one credential")]
    EmptyClaimsRequest,

    /// A credential inside a claims request failed validation.
    #[error("credentials[{index}]: {source}")]
    Credential {
        /// Position of the failing credential in the request.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<ValidationError>,
    },

    /// A DID option value is out of range or does not apply.
    #[error("invalid did:{method} option: {reason}")]
    InvalidOption {
        /// The DID method the option was given for.
        method: DidMethod,
        /// Why it was rejected.
        reason: String,
    },

    /// DID does not conform to W3C DID syntax (did:method:identifier).
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),
}

/// Serialization failure of an external type.
///
/// The underlying `serde_json` cause is kept unchanged as the error source.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// A value could not be encoded to JSON.
    #[error("failed to encode {what}: {source}")]
    Encode {
        /// The member being encoded (e.g. `"credentials"`).
        what: &'static str,
        /// The serde failure.
        #[source]
        source: serde_json::Error,
    },

    /// A protocol object could not be decoded back into a typed value.
    #[error("failed to decode {what}: {source}")]
    Decode {
        /// The member being decoded.
        what: &'static str,
        /// The serde failure.
        #[source]
        source: serde_json::Error,
    },

    /// A value serialized to something other than a JSON object
    /// where an object was required.
    #[error("{0} must serialize to a JSON object")]
    NotAnObject(&'static str),
}

/// Dispatch found no handler for a DID method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMethodError {
    /// The method tag as given by the caller.
    pub method: String,
    /// The operation being attempted, when known.
    pub operation: Option<DidOperation>,
}

impl std::fmt::Display for UnsupportedMethodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported DID method: \"{}\"", self.method)?;
        if let Some(op) = self.operation {
            write!(f, " (operation: {op})")?;
        }
        Ok(())
    }
}

impl UnsupportedMethodError {
    /// Unsupported method with no operation context (e.g. while parsing a tag).
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            operation: None,
        }
    }

    /// Attach the operation that was being attempted.
    pub fn during(mut self, operation: DidOperation) -> Self {
        self.operation = Some(operation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifier_display() {
        let msg = ValidationError::MissingIdentifier.to_string();
        assert!(msg.contains("neither"));
    }

    #[test]
    fn ambiguous_identifier_display() {
        let msg = ValidationError::AmbiguousIdentifier.to_string();
        assert!(msg.contains("both"));
    }

    #[test]
    fn credential_error_carries_index_and_source() {
        let err = ValidationError::Credential {
            index: 2,
            source: Box::new(ValidationError::MissingIdentifier),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("credentials[2]"), "got: {msg}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_option_names_method() {
        let err = ValidationError::InvalidOption {
            method: DidMethod::Cheqd,
            reason: "network must be non-empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid did:cheqd option: network must be non-empty"
        );
    }

    #[test]
    fn unsupported_method_display_with_and_without_operation() {
        let bare = UnsupportedMethodError::new("iota");
        assert_eq!(bare.to_string(), "unsupported DID method: \"iota\"");

        let with_op = UnsupportedMethodError::new("iota").during(DidOperation::Resolve);
        assert_eq!(
            with_op.to_string(),
            "unsupported DID method: \"iota\" (operation: resolve)"
        );
    }

    #[test]
    fn serialization_error_keeps_serde_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SerializationError::Decode {
            what: "claims request",
            source,
        };
        assert!(err.to_string().starts_with("failed to decode claims request"));
        let inner = std::error::Error::source(&err).expect("source");
        assert!(inner.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn vcreq_error_from_validation() {
        let err: VcreqError = ValidationError::AmbiguousIdentifier.into();
        assert!(matches!(
            err,
            VcreqError::Validation(ValidationError::AmbiguousIdentifier)
        ));
    }

    #[test]
    fn vcreq_error_unsupported_is_transparent() {
        let err: VcreqError = UnsupportedMethodError::new("sov").into();
        assert_eq!(err.to_string(), "unsupported DID method: \"sov\"");
    }
}
