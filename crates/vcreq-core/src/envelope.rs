//! # Transport Error Envelope
//!
//! The single place the core touches transport semantics. [`to_envelope`]
//! is total: every [`VcreqError`] maps to exactly one
//! `{ "message": string, "status": int }` body, and the HTTP status of the
//! response mirrors `status`.
//!
//! | Error kind | status |
//! |---|---|
//! | `Validation`, `MalformedInput`, `InvalidArgument`, `Serialization` | 400 |
//! | `UnsupportedMethod` while resolving | 404 |
//! | `UnsupportedMethod` otherwise | 400 |
//! | `Internal` | 500 |

use serde::{Deserialize, Serialize};

use crate::error::VcreqError;
use crate::identity::DidOperation;

/// Message used for client errors whose cause carries no text.
pub const UNKNOWN_APPLICATION_ERROR: &str = "Unknown application error";

/// Message used for server errors whose cause carries no text.
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// Uniform error body returned by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
}

impl ErrorEnvelope {
    /// Whether this envelope describes a server-side failure.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

impl From<&VcreqError> for ErrorEnvelope {
    fn from(err: &VcreqError) -> Self {
        to_envelope(err)
    }
}

/// Map an error to its envelope.
pub fn to_envelope(err: &VcreqError) -> ErrorEnvelope {
    let status = status_for(err);
    let message = match err {
        VcreqError::Internal(msg) => or_default(msg, UNKNOWN_SERVER_ERROR),
        VcreqError::MalformedInput(msg) | VcreqError::InvalidArgument(msg) => {
            or_default(msg, UNKNOWN_APPLICATION_ERROR)
        }
        other => other.to_string(),
    };
    ErrorEnvelope { message, status }
}

fn status_for(err: &VcreqError) -> u16 {
    match err {
        VcreqError::Validation(_)
        | VcreqError::MalformedInput(_)
        | VcreqError::InvalidArgument(_)
        | VcreqError::Serialization(_) => 400,
        VcreqError::UnsupportedMethod(e) => match e.operation {
            Some(DidOperation::Resolve) => 404,
            Some(DidOperation::Create) | None => 400,
        },
        VcreqError::Internal(_) => 500,
    }
}

fn or_default(msg: &str, default: &str) -> String {
    if msg.trim().is_empty() {
        default.to_string()
    } else {
        msg.to_string()
    }
}
