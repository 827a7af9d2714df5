//! # DID Options
//!
//! Method-specific configuration for creating or resolving a DID. The set
//! is closed: each variant belongs to exactly one DID method and one
//! operation, and [`resolve_method`] is an exhaustive match with no
//! fallback arm.
//!
//! On the wire the options are externally tagged by variant, with
//! camelCase member names:
//!
//! ```json
//! { "ebsiResolve": { "isRaw": true } }
//! ```

use serde::{Deserialize, Serialize};
use vcreq_core::{DidMethod, DidOperation, ValidationError};

/// Options for creating a `did:web`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidWebCreateOptions {
    /// Host the DID document will be served from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Path below the host, `/`-separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// X.509 certificate chain URL for the generated key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5u: Option<String>,
}

/// Options for creating a `did:ebsi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidEbsiCreateOptions {
    /// EBSI DID version. The supported set is decided by the DID service.
    pub version: i32,
}

/// Options for creating a `did:cheqd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidCheqdCreateOptions {
    /// Target ledger network, e.g. `testnet` or `mainnet`.
    pub network: String,
}

/// Options for resolving a `did:ebsi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidEbsiResolveOptions {
    /// Return the registry response unparsed.
    pub is_raw: bool,
}

/// Method-specific options for one DID operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DidOptions {
    WebCreate(DidWebCreateOptions),
    EbsiCreate(DidEbsiCreateOptions),
    CheqdCreate(DidCheqdCreateOptions),
    EbsiResolve(DidEbsiResolveOptions),
}

/// The DID method `options` are meant for.
pub fn resolve_method(options: &DidOptions) -> DidMethod {
    match options {
        DidOptions::WebCreate(_) => DidMethod::Web,
        DidOptions::EbsiCreate(_) | DidOptions::EbsiResolve(_) => DidMethod::Ebsi,
        DidOptions::CheqdCreate(_) => DidMethod::Cheqd,
    }
}

impl DidOptions {
    /// See [`resolve_method`].
    pub fn method(&self) -> DidMethod {
        resolve_method(self)
    }

    /// The operation these options configure.
    pub fn operation(&self) -> DidOperation {
        match self {
            Self::WebCreate(_) | Self::EbsiCreate(_) | Self::CheqdCreate(_) => {
                DidOperation::Create
            }
            Self::EbsiResolve(_) => DidOperation::Resolve,
        }
    }

    /// Wire tag of the variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::WebCreate(_) => "webCreate",
            Self::EbsiCreate(_) => "ebsiCreate",
            Self::CheqdCreate(_) => "cheqdCreate",
            Self::EbsiResolve(_) => "ebsiResolve",
        }
    }

    /// Check the option values themselves.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidOption`] when the cheqd network is blank or
    /// the EBSI version is not positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidOption {
            method: self.method(),
            reason,
        };
        match self {
            Self::CheqdCreate(opts) if opts.network.trim().is_empty() => {
                Err(invalid("network must not be empty".to_string()))
            }
            Self::EbsiCreate(opts) if opts.version <= 0 => Err(invalid(format!(
                "version must be positive, got {}",
                opts.version
            ))),
            _ => Ok(()),
        }
    }

    /// Reject options given for another method or operation.
    pub fn ensure_applies_to(
        &self,
        method: DidMethod,
        operation: DidOperation,
    ) -> Result<(), ValidationError> {
        if self.method() == method && self.operation() == operation {
            return Ok(());
        }
        Err(ValidationError::InvalidOption {
            method,
            reason: format!(
                "{} options do not apply to {operation} of did:{method}",
                self.tag()
            ),
        })
    }
}

impl From<DidWebCreateOptions> for DidOptions {
    fn from(opts: DidWebCreateOptions) -> Self {
        Self::WebCreate(opts)
    }
}

impl From<DidEbsiCreateOptions> for DidOptions {
    fn from(opts: DidEbsiCreateOptions) -> Self {
        Self::EbsiCreate(opts)
    }
}

impl From<DidCheqdCreateOptions> for DidOptions {
    fn from(opts: DidCheqdCreateOptions) -> Self {
        Self::CheqdCreate(opts)
    }
}

impl From<DidEbsiResolveOptions> for DidOptions {
    fn from(opts: DidEbsiResolveOptions) -> Self {
        Self::EbsiResolve(opts)
    }
}
