//! # Credential Claims
//!
//! A [`CredentialClaimSpec`] describes one credential a requester wants,
//! as an entry of the `credentials` member of a claims request:
//!
//! ```json
//! { "type": "VerifiableId", "format": "jwt_vc" }
//! ```
//!
//! ## Conditional Requirement
//!
//! `type` and `manifest_id` are each conditional: exactly one of them must be
//! present. Both present is rejected rather than resolved by precedence.
//!
//! ## Omission
//!
//! Absent optional members are left out of the encoded object entirely;
//! they never appear as `null`.

use std::fmt;

use serde::{Deserialize, Serialize};
use vcreq_core::ValidationError;

use crate::presentation::{option_one_or_many, PresentationSubmission, VerifiablePresentation};

/// Credential formats defined by the issuance protocol. Profiles may define
/// more; those are carried as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialFormat {
    /// JWT-secured credential.
    JwtVc,
    /// Linked-data-proof credential.
    LdpVc,
}

impl CredentialFormat {
    /// The recognized set.
    pub const ALL: [CredentialFormat; 2] = [CredentialFormat::JwtVc, CredentialFormat::LdpVc];

    /// Wire value of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JwtVc => "jwt_vc",
            Self::LdpVc => "ldp_vc",
        }
    }

    /// Look up a wire value in the recognized set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl fmt::Display for CredentialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How unrecognized `format` values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Unrecognized formats pass through.
    #[default]
    Lenient,
    /// Unrecognized formats are rejected.
    Strict,
}

impl ValidationMode {
    /// `Strict` when `strict` is true.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Descriptor of one requested credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialClaimSpec {
    /// Type of the requested credential. Required unless `manifest_id` is given.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,

    /// Credential manifest published by the issuer. Required unless `type` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Presentations required for this credential. Each must be bound to a
    /// nonce issued by the requester; the binding is checked elsewhere.
    /// A single presentation is accepted in place of a list when decoding.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "option_one_or_many"
    )]
    pub vp_token: Option<Vec<VerifiablePresentation>>,

    /// Maps the presentations in `vp_token` to the requested credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_submission: Option<PresentationSubmission>,

    /// The wallet's OpenID issuer URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_issuer: Option<String>,

    /// Opaque hint the wallet may use in later callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_hint: Option<String>,
}

impl CredentialClaimSpec {
    /// Request a credential by type.
    pub fn by_type(credential_type: impl Into<String>) -> Self {
        Self {
            credential_type: Some(credential_type.into()),
            ..Self::default()
        }
    }

    /// Request a credential by manifest reference.
    pub fn by_manifest(manifest_id: impl Into<String>) -> Self {
        Self {
            manifest_id: Some(manifest_id.into()),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_vp_token(mut self, presentations: Vec<VerifiablePresentation>) -> Self {
        self.vp_token = Some(presentations);
        self
    }

    pub fn with_presentation_submission(mut self, submission: PresentationSubmission) -> Self {
        self.presentation_submission = Some(submission);
        self
    }

    pub fn with_wallet_issuer(mut self, wallet_issuer: impl Into<String>) -> Self {
        self.wallet_issuer = Some(wallet_issuer.into());
        self
    }

    pub fn with_user_hint(mut self, user_hint: impl Into<String>) -> Self {
        self.user_hint = Some(user_hint.into());
        self
    }

    /// The `format` member if it is in the recognized set.
    pub fn recognized_format(&self) -> Option<CredentialFormat> {
        self.format.as_deref().and_then(CredentialFormat::parse)
    }

    /// Validate in [`ValidationMode::Lenient`].
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingIdentifier`] when neither `type` nor
    ///   `manifest_id` is present.
    /// - [`ValidationError::AmbiguousIdentifier`] when both are.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_with(ValidationMode::Lenient)
    }

    /// Validate, additionally rejecting unrecognized formats in
    /// [`ValidationMode::Strict`].
    pub fn validate_with(&self, mode: ValidationMode) -> Result<(), ValidationError> {
        match (&self.credential_type, &self.manifest_id) {
            (None, None) => return Err(ValidationError::MissingIdentifier),
            (Some(_), Some(_)) => return Err(ValidationError::AmbiguousIdentifier),
            _ => {}
        }

        if mode == ValidationMode::Strict {
            if let Some(format) = &self.format {
                if CredentialFormat::parse(format).is_none() {
                    return Err(ValidationError::UnsupportedFormat(format.clone()));
                }
            }
        }

        Ok(())
    }
}
