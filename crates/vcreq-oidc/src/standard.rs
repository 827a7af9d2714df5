//! Standard OpenID Connect claims requests (`userinfo` / `id_token`), used as
//! the base object a [`ClaimsRequest`](crate::ClaimsRequest) is merged into.
//!
//! Each requested member maps to either `null` (default request) or an
//! object carrying `essential`, `value` or `values`. See OpenID Connect
//! Core 1.0 §5.5.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::claims::ProtocolObject;

/// Requirement attached to one requested claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

impl ClaimRequirement {
    pub fn essential() -> Self {
        Self {
            essential: Some(true),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: Some(values.into_iter().collect()),
            ..Self::default()
        }
    }

    /// A requirement with no members is a default request, encoded as `null`.
    pub fn is_default(&self) -> bool {
        self.essential.is_none() && self.value.is_none() && self.values.is_none()
    }

    fn to_value(&self) -> Value {
        if self.is_default() {
            return Value::Null;
        }
        let mut object = ProtocolObject::new();
        if let Some(essential) = self.essential {
            object.insert("essential".to_string(), Value::Bool(essential));
        }
        if let Some(value) = &self.value {
            object.insert("value".to_string(), value.clone());
        }
        if let Some(values) = &self.values {
            object.insert("values".to_string(), Value::Array(values.clone()));
        }
        Value::Object(object)
    }
}

/// Builder for the base claims object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardClaims {
    userinfo: Vec<(String, ClaimRequirement)>,
    id_token: Vec<(String, ClaimRequirement)>,
}

impl StandardClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a claim returned from the UserInfo endpoint.
    pub fn userinfo(mut self, name: impl Into<String>, requirement: ClaimRequirement) -> Self {
        upsert(&mut self.userinfo, name.into(), requirement);
        self
    }

    /// Request a claim returned in the ID token.
    pub fn id_token(mut self, name: impl Into<String>, requirement: ClaimRequirement) -> Self {
        upsert(&mut self.id_token, name.into(), requirement);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.userinfo.is_empty() && self.id_token.is_empty()
    }

    /// Render as the ordered base object. Empty sections are omitted.
    pub fn to_protocol_object(&self) -> ProtocolObject {
        let mut object = ProtocolObject::new();
        for (key, section) in [("userinfo", &self.userinfo), ("id_token", &self.id_token)] {
            if section.is_empty() {
                continue;
            }
            let members = section
                .iter()
                .map(|(name, requirement)| (name.clone(), requirement.to_value()))
                .collect();
            object.insert(key.to_string(), Value::Object(members));
        }
        object
    }
}

fn upsert(section: &mut Vec<(String, ClaimRequirement)>, name: String, requirement: ClaimRequirement) {
    match section.iter_mut().find(|(existing, _)| *existing == name) {
        Some((_, slot)) => *slot = requirement,
        None => section.push((name, requirement)),
    }
}

impl From<StandardClaims> for ProtocolObject {
    fn from(claims: StandardClaims) -> Self {
        claims.to_protocol_object()
    }
}
