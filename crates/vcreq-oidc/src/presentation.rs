//! # Presentation Exchange Carriers
//!
//! DIF Presentation Exchange objects and W3C Verifiable Presentations as they
//! travel inside a claims request. This crate does not interpret them: it
//! only has to carry them through serialization without loss, so every
//! object keeps unknown members in a flattened `extra` map.
//!
//! References:
//! - <https://identity.foundation/presentation-exchange/>
//! - <https://www.w3.org/TR/vc-data-model/#presentations-0>

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// What a verifier requests: a set of input descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationDefinition {
    /// Unique identifier of this definition.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// The credentials being requested.
    pub input_descriptors: Vec<InputDescriptor>,
    /// Claim format designations (`jwt_vc`, `ldp_vp`, ...) and their algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_requirements: Option<Vec<Value>>,
    /// Members not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PresentationDefinition {
    /// A definition with the given id and descriptors and nothing else.
    pub fn new(id: impl Into<String>, input_descriptors: Vec<InputDescriptor>) -> Self {
        Self {
            id: id.into(),
            name: None,
            purpose: None,
            input_descriptors,
            format: None,
            submission_requirements: None,
            extra: Map::new(),
        }
    }
}

/// One requested credential inside a [`PresentationDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,
    /// Pre-v2 descriptors reference schemas directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputDescriptor {
    /// A descriptor with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            purpose: None,
            group: None,
            schema: None,
            constraints: None,
            extra: Map::new(),
        }
    }
}

/// What a holder provided: maps presentations to input descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationSubmission {
    pub id: String,
    /// The [`PresentationDefinition::id`] this submission answers.
    pub definition_id: String,
    pub descriptor_map: Vec<DescriptorMapping>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PresentationSubmission {
    pub fn new(
        id: impl Into<String>,
        definition_id: impl Into<String>,
        descriptor_map: Vec<DescriptorMapping>,
    ) -> Self {
        Self {
            id: id.into(),
            definition_id: definition_id.into(),
            descriptor_map,
            extra: Map::new(),
        }
    }
}

/// One entry of a [`PresentationSubmission`] descriptor map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorMapping {
    /// The input descriptor id being answered.
    pub id: String,
    /// Claim format of the matched object.
    pub format: String,
    /// JSONPath to the matched object.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_nested: Option<Box<DescriptorMapping>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DescriptorMapping {
    /// A top-level mapping with no nested path.
    pub fn new(id: impl Into<String>, format: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            format: format.into(),
            path: path.into(),
            path_nested: None,
            extra: Map::new(),
        }
    }
}

/// A verifiable presentation, either compact-serialized (JWT) or embedded
/// as a JSON-LD document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifiablePresentation {
    /// JWT-encoded presentation (`jwt_vp`).
    Jwt(String),
    /// JSON-LD presentation (`ldp_vp`).
    Document(Box<PresentationDocument>),
}

/// JSON-LD verifiable presentation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationDocument {
    #[serde(rename = "@context")]
    pub context: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Presentation type(s). Should include `"VerifiablePresentation"`.
    #[serde(rename = "type")]
    pub presentation_type: TypeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// Embedded credentials, JSON-LD objects or JWT strings. An explicit
    /// empty list is kept as `Some(vec![])`.
    #[serde(
        rename = "verifiableCredential",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "option_one_or_many"
    )]
    pub verifiable_credential: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `type` value, either a single string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeValue {
    Single(String),
    Array(Vec<String>),
}

impl TypeValue {
    /// Whether `name` is among the listed types.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            TypeValue::Single(s) => s == name,
            TypeValue::Array(arr) => arr.iter().any(|s| s == name),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(v: OneOrMany<T>) -> Self {
        match v {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Accept a single item wherever an optional list is expected; `null` stays `None`.
pub(crate) fn option_one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?.map(Vec::from))
}
