//! # DID Identifiers and Method Tags
//!
//! - [`Did`]: a W3C Decentralized Identifier, validated at construction.
//! - [`DidMethod`]: the closed set of DID methods the service layer knows.
//! - [`DidOperation`]: create vs resolve, the second dispatch axis.
//!
//! Reference: <https://www.w3.org/TR/did-core/#did-syntax>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UnsupportedMethodError, ValidationError};

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>`
/// where method is lowercase alphanumeric and method-specific-id is non-empty.
///
/// # Validation
///
/// - Must start with `did:`
/// - Method name must be at least 1 character, lowercase alphanumeric
/// - Must have a `:` separator after method
/// - Method-specific identifier must be non-empty
///
/// The method name is *not* checked against [`DidMethod`]: a syntactically
/// valid DID of an unknown method is still a DID, and dispatch reports it
/// as unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Build `did:<method>:<identifier>` from parts.
    pub fn from_parts(method: DidMethod, identifier: &str) -> Result<Self, ValidationError> {
        Self::new(format!("did:{}:{identifier}", method.as_str()))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidDid(s.to_string());
        let rest = s.strip_prefix("did:").ok_or_else(invalid)?;
        let (method, identifier) = rest.split_once(':').ok_or_else(invalid)?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if identifier.is_empty() {
            return Err(invalid());
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw method name (the part between the first and second colons).
    pub fn method_name(&self) -> &str {
        self.split().0
    }

    /// The method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        self.split().1
    }

    /// The method as a known [`DidMethod`].
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedMethodError`] for methods outside the known set.
    pub fn method(&self) -> Result<DidMethod, UnsupportedMethodError> {
        self.method_name().parse()
    }

    fn split(&self) -> (&str, &str) {
        self.0
            .get(4..)
            .and_then(|rest| rest.split_once(':'))
            .unwrap_or(("", ""))
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// DID methods known to the service layer.
///
/// Closed set: supporting a new method means adding a variant here, and
/// every `match` on it has to handle the addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DidMethod {
    /// `did:key`
    Key,
    /// `did:web`
    Web,
    /// `did:ebsi` (European Blockchain Services Infrastructure)
    Ebsi,
    /// `did:cheqd`
    Cheqd,
    /// `did:jwk`
    Jwk,
}

impl DidMethod {
    /// Every known method, in declaration order.
    pub const ALL: [DidMethod; 5] = [
        DidMethod::Key,
        DidMethod::Web,
        DidMethod::Ebsi,
        DidMethod::Cheqd,
        DidMethod::Jwk,
    ];

    /// The method tag as it appears in a DID.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Web => "web",
            Self::Ebsi => "ebsi",
            Self::Cheqd => "cheqd",
            Self::Jwk => "jwk",
        }
    }
}

impl fmt::Display for DidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DidMethod {
    type Err = UnsupportedMethodError;

    /// Parse a method tag. There is no fallback: anything outside the
    /// known set is an [`UnsupportedMethodError`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnsupportedMethodError::new(s))
    }
}

/// The kind of DID operation being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DidOperation {
    /// Create a new DID (and its document).
    Create,
    /// Resolve an existing DID to its document.
    Resolve,
}

impl fmt::Display for DidOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Resolve => f.write_str("resolve"),
        }
    }
}
