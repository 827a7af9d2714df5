//! # vcreq-oidc
//!
//! Claims requests for OIDC4VP / SIOP credential presentation.
//!
//! A [`ClaimsRequest`] is built once per protocol turn from
//! [`CredentialClaimSpec`] entries and an optional [`VpTokenClaim`], then
//! merged into a base claims object (see [`StandardClaims`]) to produce
//! the transmitted [`ProtocolObject`].
//!
//! ```
//! use vcreq_oidc::{ClaimRequirement, ClaimsRequest, CredentialClaimSpec, StandardClaims};
//!
//! let base = StandardClaims::new()
//!     .id_token("auth_time", ClaimRequirement::essential())
//!     .to_protocol_object();
//! let request = ClaimsRequest::builder()
//!     .credential(CredentialClaimSpec::by_type("VerifiableId").with_format("jwt_vc"))
//!     .build();
//! let json = request.to_json_string(base).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"id_token":{"auth_time":{"essential":true}},"credentials":[{"type":"VerifiableId","format":"jwt_vc"}]}"#
//! );
//! ```

pub mod claims;
pub mod credential;
pub mod presentation;
pub mod standard;
pub mod vp_token;

pub use claims::{ClaimsRequest, ClaimsRequestBuilder, ProtocolObject, CREDENTIALS_KEY, VP_TOKEN_KEY};
pub use credential::{CredentialClaimSpec, CredentialFormat, ValidationMode};
pub use presentation::{
    DescriptorMapping, InputDescriptor, PresentationDefinition, PresentationDocument,
    PresentationSubmission, TypeValue, VerifiablePresentation,
};
pub use standard::{ClaimRequirement, StandardClaims};
pub use vp_token::VpTokenClaim;
