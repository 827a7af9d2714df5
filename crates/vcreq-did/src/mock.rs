//! Mock DID adapter for testing and development.
//!
//! Derives DIDs from the request alone: no keys are generated, nothing is
//! stored, and no registry is contacted. With a key alias the result is
//! deterministic; without one a random UUID stands in for the key.

use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;
use vcreq_core::{Did, DidMethod};

use crate::options::{DidEbsiResolveOptions, DidOptions, DidWebCreateOptions};
use crate::service::{DidCreateRequest, DidService, DidServiceError};

const DEFAULT_WEB_DOMAIN: &str = "localhost";
const DEFAULT_CHEQD_NETWORK: &str = "testnet";

/// Mock adapter serving a single method.
#[derive(Debug, Clone)]
pub struct MockDidService {
    method: DidMethod,
}

impl MockDidService {
    pub fn new(method: DidMethod) -> Self {
        Self { method }
    }

    /// One mock adapter per known method.
    pub fn all() -> Vec<Arc<dyn DidService>> {
        DidMethod::ALL
            .into_iter()
            .map(|method| Arc::new(Self::new(method)) as Arc<dyn DidService>)
            .collect()
    }

    fn key_id(request: &DidCreateRequest) -> Result<String, DidServiceError> {
        match request.key_alias.as_deref().map(str::trim) {
            Some("") => Err(DidServiceError::InvalidArgument {
                reason: "key alias must not be empty".to_string(),
            }),
            Some(alias) => Ok(sanitize_segment(alias)),
            None => Ok(Uuid::new_v4().simple().to_string()),
        }
    }

    fn method_specific_id(&self, request: &DidCreateRequest) -> Result<String, DidServiceError> {
        let key_id = Self::key_id(request)?;
        let id = match (self.method, &request.options) {
            (DidMethod::Web, options) => {
                let web = match options {
                    Some(DidOptions::WebCreate(opts)) => opts.clone(),
                    _ => DidWebCreateOptions::default(),
                };
                web_identifier(&web, &key_id)
            }
            (DidMethod::Cheqd, Some(DidOptions::CheqdCreate(opts))) => {
                format!("{}:{key_id}", opts.network.trim())
            }
            (DidMethod::Cheqd, _) => format!("{DEFAULT_CHEQD_NETWORK}:{key_id}"),
            (DidMethod::Ebsi, Some(DidOptions::EbsiCreate(opts))) if opts.version > 1 => {
                format!("zv{}{key_id}", opts.version)
            }
            (DidMethod::Ebsi, _) => format!("z{key_id}"),
            (DidMethod::Key, _) => format!("z6Mk{key_id}"),
            (DidMethod::Jwk, _) => format!("eyJraWQiOi{key_id}"),
        };
        Ok(id)
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `-`.
fn sanitize_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `did:web:<domain>[:<path segments>]`, with the port colon encoded.
fn web_identifier(options: &DidWebCreateOptions, key_id: &str) -> String {
    let domain = options
        .domain
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_WEB_DOMAIN)
        .replace(':', "%3A");
    let path: Vec<String> = match options.path.as_deref() {
        Some(path) => path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(sanitize_segment)
            .collect(),
        None => vec!["identity".to_string(), key_id.to_string()],
    };
    std::iter::once(domain)
        .chain(path)
        .collect::<Vec<_>>()
        .join(":")
}

impl DidService for MockDidService {
    fn method(&self) -> DidMethod {
        self.method
    }

    fn create(&self, request: &DidCreateRequest) -> Result<Did, DidServiceError> {
        if request.method != self.method {
            return Err(DidServiceError::InvalidArgument {
                reason: format!(
                    "{} serves did:{}, not did:{}",
                    self.adapter_name(),
                    self.method,
                    request.method
                ),
            });
        }
        let id = self.method_specific_id(request)?;
        Ok(Did::from_parts(self.method, &id)?)
    }

    fn resolve(&self, did: &Did, options: Option<&DidOptions>) -> Result<Value, DidServiceError> {
        if did.method_name() != self.method.as_str() {
            return Err(DidServiceError::InvalidArgument {
                reason: format!("{} cannot resolve {did}", self.adapter_name()),
            });
        }
        let key_ref = format!("{did}#key-1");
        let document = json!({
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": did.as_str(),
            "verificationMethod": [{
                "id": key_ref,
                "type": "JsonWebKey2020",
                "controller": did.as_str(),
            }],
            "authentication": [key_ref],
            "assertionMethod": [key_ref],
        });
        match options {
            Some(DidOptions::EbsiResolve(DidEbsiResolveOptions { is_raw: true })) => Ok(json!({
                "didDocument": document,
                "didDocumentMetadata": {},
            })),
            _ => Ok(document),
        }
    }

    fn adapter_name(&self) -> &str {
        "MockDidService"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DidCheqdCreateOptions, DidEbsiCreateOptions};

    fn create(method: DidMethod, request: DidCreateRequest) -> Did {
        MockDidService::new(method).create(&request).unwrap()
    }

    #[test]
    fn key_alias_gives_deterministic_did() {
        let request = DidCreateRequest::new(DidMethod::Key).with_key_alias("alice");
        assert_eq!(create(DidMethod::Key, request.clone()).as_str(), "did:key:z6Mkalice");
        assert_eq!(
            create(DidMethod::Key, request.clone()),
            create(DidMethod::Key, request)
        );
    }

    #[test]
    fn without_alias_each_did_is_fresh() {
        let a = create(DidMethod::Key, DidCreateRequest::new(DidMethod::Key));
        let b = create(DidMethod::Key, DidCreateRequest::new(DidMethod::Key));
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("did:key:z6Mk"));
    }

    #[test]
    fn web_uses_domain_and_path() {
        let request = DidCreateRequest::new(DidMethod::Web)
            .with_key_alias("k")
            .with_options(DidWebCreateOptions {
                domain: Some("example.com:8443".to_string()),
                path: Some("/users/alice".to_string()),
                x5u: None,
            });
        assert_eq!(
            create(DidMethod::Web, request).as_str(),
            "did:web:example.com%3A8443:users:alice"
        );

        let default = DidCreateRequest::new(DidMethod::Web).with_key_alias("k");
        assert_eq!(
            create(DidMethod::Web, default).as_str(),
            "did:web:localhost:identity:k"
        );
    }

    #[test]
    fn web_path_segments_are_sanitized() {
        let request = DidCreateRequest::new(DidMethod::Web)
            .with_key_alias("k")
            .with_options(DidWebCreateOptions {
                domain: None,
                path: Some("/a b/c:d/ /".to_string()),
                x5u: None,
            });
        assert_eq!(
            create(DidMethod::Web, request).as_str(),
            "did:web:localhost:a-b:c-d"
        );
    }

    #[test]
    fn cheqd_network_prefix() {
        let request = DidCreateRequest::new(DidMethod::Cheqd)
            .with_key_alias("k")
            .with_options(DidCheqdCreateOptions {
                network: "mainnet".to_string(),
            });
        assert_eq!(create(DidMethod::Cheqd, request).as_str(), "did:cheqd:mainnet:k");
    }

    #[test]
    fn ebsi_version_two_is_marked() {
        let v2 = DidCreateRequest::new(DidMethod::Ebsi)
            .with_key_alias("k")
            .with_options(DidEbsiCreateOptions { version: 2 });
        assert_eq!(create(DidMethod::Ebsi, v2).as_str(), "did:ebsi:zv2k");
    }

    #[test]
    fn alias_is_sanitized_and_must_not_be_blank() {
        let request = DidCreateRequest::new(DidMethod::Key).with_key_alias("my key/1");
        assert_eq!(create(DidMethod::Key, request).as_str(), "did:key:z6Mkmy-key-1");

        let blank = DidCreateRequest::new(DidMethod::Key).with_key_alias("  ");
        assert!(matches!(
            MockDidService::new(DidMethod::Key).create(&blank),
            Err(DidServiceError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn raw_ebsi_resolution_wraps_document() {
        let service = MockDidService::new(DidMethod::Ebsi);
        let did = Did::new("did:ebsi:zabc").unwrap();
        let raw = DidOptions::EbsiResolve(DidEbsiResolveOptions { is_raw: true });

        let wrapped = service.resolve(&did, Some(&raw)).unwrap();
        assert_eq!(wrapped["didDocument"]["id"], "did:ebsi:zabc");

        let plain = service.resolve(&did, None).unwrap();
        assert_eq!(plain["id"], "did:ebsi:zabc");
        assert_eq!(plain["authentication"][0], "did:ebsi:zabc#key-1");
    }

    #[test]
    fn rejects_foreign_method() {
        let service = MockDidService::new(DidMethod::Web);
        assert!(service
            .create(&DidCreateRequest::new(DidMethod::Key))
            .is_err());
        assert!(service
            .resolve(&Did::new("did:key:z6Mk").unwrap(), None)
            .is_err());
    }
}
