//! # Claims Request
//!
//! The protocol message a verifier or issuer sends to a wallet describing
//! which credentials or presentations it requires. A [`ClaimsRequest`]
//! composes an optional [`VpTokenClaim`] with an optional list of
//! [`CredentialClaimSpec`], and is transmitted merged into a base protocol
//! claims object (the standard OpenID `userinfo` / `id_token` requests, see
//! [`crate::standard`]).
//!
//! ## Merge
//!
//! [`ClaimsRequest::to_protocol_object`] is additive. Starting from the base
//! object it sets `credentials` (when non-empty) and then `vp_token` (when
//! present). Nothing else is touched. With `serde_json`'s `preserve_order`
//! the emitted key order is: base keys in their original order, then
//! `credentials`, then `vp_token`. A base key of the same name is
//! overwritten in place.
//!
//! The merge works directly on the ordered map; no value is rendered to
//! text and parsed back.
//!
//! ## Lifecycle
//!
//! Built once per protocol turn and immutable afterwards: fields are private
//! and only readable through accessors.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use vcreq_core::{SerializationError, ValidationError};

use crate::credential::{CredentialClaimSpec, ValidationMode};
use crate::vp_token::VpTokenClaim;

/// An ordered JSON object as transmitted on the wire.
pub type ProtocolObject = Map<String, Value>;

/// Wire key of the credentials member.
pub const CREDENTIALS_KEY: &str = "credentials";

/// Wire key of the vp_token member.
pub const VP_TOKEN_KEY: &str = "vp_token";

/// A verifiable-credential claims request.
///
/// Construction does not require either member: an empty request is a
/// caller error reported by [`ClaimsRequest::ensure_not_empty`] at the
/// protocol layer, and merging it leaves the base object unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimsRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    credentials: Option<Vec<CredentialClaimSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    vp_token: Option<VpTokenClaim>,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<Vec<CredentialClaimSpec>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CredentialClaimSpec>>::deserialize(deserializer)?.filter(|c| !c.is_empty()))
}

impl ClaimsRequest {
    /// Build a request. An empty credentials list is treated as absent.
    pub fn new(
        vp_token: Option<VpTokenClaim>,
        credentials: Option<Vec<CredentialClaimSpec>>,
    ) -> Self {
        Self {
            credentials: credentials.filter(|c| !c.is_empty()),
            vp_token,
        }
    }

    /// Start an empty builder.
    pub fn builder() -> ClaimsRequestBuilder {
        ClaimsRequestBuilder::default()
    }

    pub fn vp_token(&self) -> Option<&VpTokenClaim> {
        self.vp_token.as_ref()
    }

    /// Requested credentials, in request order. Empty when absent.
    pub fn credentials(&self) -> &[CredentialClaimSpec] {
        self.credentials.as_deref().unwrap_or_default()
    }

    /// Whether neither member is present.
    pub fn is_empty(&self) -> bool {
        self.vp_token.is_none() && self.credentials.is_none()
    }

    /// Reject a request that asks for nothing.
    pub fn ensure_not_empty(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyClaimsRequest);
        }
        Ok(())
    }

    /// Validate every credential claim, reporting the first failure with
    /// its position.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), ValidationError> {
        for (index, credential) in self.credentials().iter().enumerate() {
            credential
                .validate_with(mode)
                .map_err(|source| ValidationError::Credential {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Merge this request into `base` and return the transmitted object.
    ///
    /// # Errors
    ///
    /// [`SerializationError::Encode`] if a carried external value cannot be
    /// encoded; the serde cause is kept as the error source.
    pub fn to_protocol_object(
        &self,
        mut base: ProtocolObject,
    ) -> Result<ProtocolObject, SerializationError> {
        if let Some(credentials) = self.credentials.as_deref().filter(|c| !c.is_empty()) {
            let value = serde_json::to_value(credentials).map_err(|source| {
                SerializationError::Encode {
                    what: CREDENTIALS_KEY,
                    source,
                }
            })?;
            base.insert(CREDENTIALS_KEY.to_string(), value);
        }

        if let Some(vp_token) = &self.vp_token {
            let value =
                serde_json::to_value(vp_token).map_err(|source| SerializationError::Encode {
                    what: VP_TOKEN_KEY,
                    source,
                })?;
            base.insert(VP_TOKEN_KEY.to_string(), value);
        }

        Ok(base)
    }

    /// Merge into `base` and render compact JSON text.
    pub fn to_json_string(&self, base: ProtocolObject) -> Result<String, SerializationError> {
        let object = self.to_protocol_object(base)?;
        serde_json::to_string(&object).map_err(|source| SerializationError::Encode {
            what: "protocol claims",
            source,
        })
    }

    /// Read the claims request members back out of a transmitted object.
    /// Every other key is ignored.
    pub fn from_protocol_object(object: &ProtocolObject) -> Result<Self, SerializationError> {
        let credentials = object
            .get(CREDENTIALS_KEY)
            .filter(|value| !value.is_null())
            .map(|value| decode::<Vec<CredentialClaimSpec>>(value, CREDENTIALS_KEY))
            .transpose()?;
        let vp_token = object
            .get(VP_TOKEN_KEY)
            .filter(|value| !value.is_null())
            .map(|value| decode::<VpTokenClaim>(value, VP_TOKEN_KEY))
            .transpose()?;
        Ok(Self::new(vp_token, credentials))
    }

    /// Parse a transmitted object from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SerializationError> {
        let value: Value = serde_json::from_str(text).map_err(|source| {
            SerializationError::Decode {
                what: "protocol claims",
                source,
            }
        })?;
        match value {
            Value::Object(object) => Self::from_protocol_object(&object),
            _ => Err(SerializationError::NotAnObject("protocol claims")),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    value: &Value,
    what: &'static str,
) -> Result<T, SerializationError> {
    T::deserialize(value).map_err(|source| SerializationError::Decode { what, source })
}

/// Incremental construction of a [`ClaimsRequest`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsRequestBuilder {
    vp_token: Option<VpTokenClaim>,
    credentials: Vec<CredentialClaimSpec>,
}

impl ClaimsRequestBuilder {
    pub fn vp_token(mut self, vp_token: impl Into<VpTokenClaim>) -> Self {
        self.vp_token = Some(vp_token.into());
        self
    }

    pub fn credential(mut self, credential: CredentialClaimSpec) -> Self {
        self.credentials.push(credential);
        self
    }

    pub fn credentials(mut self, credentials: impl IntoIterator<Item = CredentialClaimSpec>) -> Self {
        self.credentials.extend(credentials);
        self
    }

    pub fn build(self) -> ClaimsRequest {
        ClaimsRequest::new(self.vp_token, Some(self.credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{InputDescriptor, PresentationDefinition};
    use serde_json::json;

    fn base() -> ProtocolObject {
        let Value::Object(map) = json!({
            "userinfo": {"given_name": {"essential": true}},
            "id_token": {"auth_time": {"essential": true}}
        }) else {
            unreachable!()
        };
        map
    }

    fn vp_token() -> VpTokenClaim {
        PresentationDefinition::new("pd-1", vec![InputDescriptor::new("VerifiableId")]).into()
    }

    fn keys(object: &ProtocolObject) -> Vec<&str> {
        object.keys().map(String::as_str).collect()
    }

    #[test]
    fn credentials_only_has_no_vp_token_key() {
        let request = ClaimsRequest::builder()
            .credential(CredentialClaimSpec::by_type("VerifiableId").with_format("jwt_vc"))
            .build();
        let text = request.to_json_string(ProtocolObject::new()).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.get("credentials").is_some());
        assert!(parsed.get("vp_token").is_none());
    }

    #[test]
    fn empty_request_leaves_base_unmodified() {
        let request = ClaimsRequest::default();
        assert!(request.is_empty());
        assert_eq!(request.to_protocol_object(base()).unwrap(), base());
    }

    #[test]
    fn empty_credentials_list_is_absent() {
        let request = ClaimsRequest::new(None, Some(vec![]));
        assert!(request.is_empty());
        assert!(request.credentials().is_empty());
        assert_eq!(request, ClaimsRequest::default());
        assert_eq!(request.to_protocol_object(base()).unwrap(), base());
    }

    #[test]
    fn merge_appends_credentials_then_vp_token_after_base_keys() {
        let request = ClaimsRequest::builder()
            .vp_token(vp_token())
            .credential(CredentialClaimSpec::by_type("VerifiableId"))
            .build();
        let merged = request.to_protocol_object(base()).unwrap();
        assert_eq!(
            keys(&merged),
            vec!["userinfo", "id_token", "credentials", "vp_token"]
        );
        assert_eq!(merged["userinfo"], base()["userinfo"]);
    }

    #[test]
    fn merge_overwrites_existing_key_in_place() {
        let mut base = base();
        base.insert("credentials".to_string(), json!("stale"));
        base.insert("nonce".to_string(), json!("n-0S6_WzA2Mj"));

        let request = ClaimsRequest::builder()
            .credential(CredentialClaimSpec::by_manifest("m-1"))
            .build();
        let merged = request.to_protocol_object(base).unwrap();
        assert_eq!(
            keys(&merged),
            vec!["userinfo", "id_token", "credentials", "nonce"]
        );
        assert_eq!(merged["credentials"], json!([{"manifest_id": "m-1"}]));
    }

    #[test]
    fn golden_wire_format() {
        let request = ClaimsRequest::builder()
            .vp_token(vp_token())
            .credential(CredentialClaimSpec::by_type("VerifiableId").with_format("jwt_vc"))
            .credential(CredentialClaimSpec::by_manifest("m-2").with_user_hint("hint"))
            .build();
        let text = request.to_json_string(base()).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"userinfo":{"given_name":{"essential":true}},"#,
                r#""id_token":{"auth_time":{"essential":true}},"#,
                r#""credentials":[{"type":"VerifiableId","format":"jwt_vc"},"#,
                r#"{"manifest_id":"m-2","user_hint":"hint"}],"#,
                r#""vp_token":{"presentation_definition":{"id":"pd-1","input_descriptors":[{"id":"VerifiableId"}]}}}"#
            )
        );
    }

    #[test]
    fn protocol_object_round_trip_ignores_base_keys() {
        let request = ClaimsRequest::builder()
            .vp_token(vp_token())
            .credential(CredentialClaimSpec::by_type("VerifiableId"))
            .build();
        let merged = request.to_protocol_object(base()).unwrap();
        assert_eq!(ClaimsRequest::from_protocol_object(&merged).unwrap(), request);
    }

    #[test]
    fn from_json_str_rejects_non_object() {
        assert!(matches!(
            ClaimsRequest::from_json_str("[]"),
            Err(SerializationError::NotAnObject(_))
        ));
        assert!(matches!(
            ClaimsRequest::from_json_str("{"),
            Err(SerializationError::Decode { .. })
        ));
    }

    #[test]
    fn from_protocol_object_reports_bad_member() {
        let mut object = ProtocolObject::new();
        object.insert("credentials".to_string(), json!({"type": "not-a-list"}));
        match ClaimsRequest::from_protocol_object(&object) {
            Err(SerializationError::Decode { what, .. }) => assert_eq!(what, "credentials"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn null_members_read_as_absent() {
        for text in [
            r#"{"credentials":null}"#,
            r#"{"vp_token":null}"#,
            r#"{"credentials":null,"vp_token":null}"#,
        ] {
            let parsed = ClaimsRequest::from_json_str(text).unwrap();
            assert_eq!(parsed, ClaimsRequest::default(), "{text}");
            let via_serde: ClaimsRequest = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, via_serde, "{text}");
        }
    }

    #[test]
    fn validate_reports_failing_index() {
        let request = ClaimsRequest::builder()
            .credential(CredentialClaimSpec::by_type("VerifiableId"))
            .credential(CredentialClaimSpec::default())
            .build();
        assert_eq!(
            request.validate(ValidationMode::Lenient),
            Err(ValidationError::Credential {
                index: 1,
                source: Box::new(ValidationError::MissingIdentifier),
            })
        );
    }

    #[test]
    fn ensure_not_empty() {
        assert_eq!(
            ClaimsRequest::default().ensure_not_empty(),
            Err(ValidationError::EmptyClaimsRequest)
        );
        assert!(ClaimsRequest::new(Some(vp_token()), None)
            .ensure_not_empty()
            .is_ok());
    }

    #[test]
    fn serde_decodes_empty_credentials_as_absent() {
        let request: ClaimsRequest = serde_json::from_value(json!({"credentials": []})).unwrap();
        assert!(request.is_empty());
    }
}
