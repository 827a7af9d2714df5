//! # Method Dispatch
//!
//! Routes create and resolve calls to the [`DidService`] registered for the
//! DID method. The registry is built once and never modified, so a
//! dispatcher can be shared behind an `Arc` without locking.
//!
//! Every call follows the same order: validate options, check they apply
//! to the method and operation, then select the adapter. A method with no
//! adapter fails with [`UnsupportedMethodError`] carrying the operation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use vcreq_core::{Did, DidMethod, DidOperation, UnsupportedMethodError};

use crate::options::DidOptions;
use crate::service::{DidCreateRequest, DidService, DidServiceError};

/// Registry of DID method adapters.
#[derive(Clone, Default)]
pub struct DidDispatcher {
    services: HashMap<DidMethod, Arc<dyn DidService>>,
}

impl fmt::Debug for DidDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adapters: Vec<_> = self
            .services
            .iter()
            .map(|(method, service)| (*method, service.adapter_name().to_string()))
            .collect();
        adapters.sort();
        f.debug_struct("DidDispatcher")
            .field("adapters", &adapters)
            .finish()
    }
}

impl DidDispatcher {
    /// Build a dispatcher. A later adapter for the same method replaces an
    /// earlier one.
    pub fn new(services: impl IntoIterator<Item = Arc<dyn DidService>>) -> Self {
        let services = services
            .into_iter()
            .map(|service| (service.method(), service))
            .collect();
        Self { services }
    }

    /// Whether an adapter is registered for `method`.
    pub fn supports(&self, method: DidMethod) -> bool {
        self.services.contains_key(&method)
    }

    /// Registered methods in declaration order.
    pub fn methods(&self) -> Vec<DidMethod> {
        let mut methods: Vec<_> = self.services.keys().copied().collect();
        methods.sort();
        methods
    }

    /// Create a DID through the adapter for `request.method`.
    pub fn create(&self, request: &DidCreateRequest) -> Result<Did, DidServiceError> {
        if let Some(options) = &request.options {
            check_options(options, request.method, DidOperation::Create)?;
        }
        let service = self.service(request.method, DidOperation::Create)?;
        tracing::debug!(
            method = %request.method,
            adapter = service.adapter_name(),
            "dispatching DID create"
        );

        let did = service.create(request)?;
        if did.method_name() != request.method.as_str() {
            return Err(DidServiceError::Backend {
                adapter: service.adapter_name().to_string(),
                reason: format!("created {did} for did:{} request", request.method),
            });
        }
        Ok(did)
    }

    /// Resolve `did` through the adapter for its method.
    pub fn resolve(
        &self,
        did: &Did,
        options: Option<&DidOptions>,
    ) -> Result<Value, DidServiceError> {
        let method = did.method().map_err(|err| {
            tracing::warn!(did = %did, "resolve requested for unknown DID method");
            err.during(DidOperation::Resolve)
        })?;
        if let Some(options) = options {
            check_options(options, method, DidOperation::Resolve)?;
        }
        let service = self.service(method, DidOperation::Resolve)?;
        tracing::debug!(
            %method,
            adapter = service.adapter_name(),
            "dispatching DID resolve"
        );
        service.resolve(did, options)
    }

    fn service(
        &self,
        method: DidMethod,
        operation: DidOperation,
    ) -> Result<&Arc<dyn DidService>, UnsupportedMethodError> {
        self.services.get(&method).ok_or_else(|| {
            tracing::warn!(%method, %operation, "no DID adapter registered");
            UnsupportedMethodError::new(method.as_str()).during(operation)
        })
    }
}

fn check_options(
    options: &DidOptions,
    method: DidMethod,
    operation: DidOperation,
) -> Result<(), DidServiceError> {
    options.validate()?;
    options.ensure_applies_to(method, operation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDidService;
    use crate::options::{
        DidCheqdCreateOptions, DidEbsiCreateOptions, DidEbsiResolveOptions, DidWebCreateOptions,
    };
    use vcreq_core::ValidationError;

    fn web_only() -> DidDispatcher {
        DidDispatcher::new([Arc::new(MockDidService::new(DidMethod::Web)) as Arc<dyn DidService>])
    }

    /// Returns a DID of the wrong method.
    struct Misbehaving;

    impl DidService for Misbehaving {
        fn method(&self) -> DidMethod {
            DidMethod::Web
        }
        fn create(&self, _request: &DidCreateRequest) -> Result<Did, DidServiceError> {
            Ok(Did::new("did:key:z6Mk")?)
        }
        fn resolve(&self, _did: &Did, _: Option<&DidOptions>) -> Result<Value, DidServiceError> {
            Ok(Value::Null)
        }
        fn adapter_name(&self) -> &str {
            "Misbehaving"
        }
    }

    #[test]
    fn missing_adapter_is_unsupported_with_operation() {
        let dispatcher = web_only();
        match dispatcher.create(&DidCreateRequest::new(DidMethod::Ebsi)) {
            Err(DidServiceError::UnsupportedMethod(err)) => {
                assert_eq!(err.method, "ebsi");
                assert_eq!(err.operation, Some(DidOperation::Create));
            }
            other => panic!("expected UnsupportedMethod, got {other:?}"),
        }

        let did = Did::new("did:ebsi:zabc").unwrap();
        match dispatcher.resolve(&did, None) {
            Err(DidServiceError::UnsupportedMethod(err)) => {
                assert_eq!(err.operation, Some(DidOperation::Resolve));
            }
            other => panic!("expected UnsupportedMethod, got {other:?}"),
        }
    }

    #[test]
    fn unknown_did_method_is_unsupported_on_resolve() {
        let dispatcher = DidDispatcher::new(MockDidService::all());
        let did = Did::new("did:iota:0xabc").unwrap();
        match dispatcher.resolve(&did, None) {
            Err(DidServiceError::UnsupportedMethod(err)) => {
                assert_eq!(err.method, "iota");
                assert_eq!(err.operation, Some(DidOperation::Resolve));
            }
            other => panic!("expected UnsupportedMethod, got {other:?}"),
        }
    }

    #[test]
    fn options_are_validated_before_adapter_lookup() {
        let dispatcher = web_only();
        let request = DidCreateRequest::new(DidMethod::Cheqd).with_options(DidCheqdCreateOptions {
            network: String::new(),
        });
        assert!(matches!(
            dispatcher.create(&request),
            Err(DidServiceError::Validation(ValidationError::InvalidOption { .. }))
        ));
    }

    #[test]
    fn options_for_other_method_are_rejected() {
        let dispatcher = DidDispatcher::new(MockDidService::all());
        let request = DidCreateRequest::new(DidMethod::Web)
            .with_options(DidEbsiCreateOptions { version: 1 });
        assert!(matches!(
            dispatcher.create(&request),
            Err(DidServiceError::Validation(ValidationError::InvalidOption {
                method: DidMethod::Web,
                ..
            }))
        ));
    }

    #[test]
    fn resolve_options_rejected_on_create() {
        let dispatcher = DidDispatcher::new(MockDidService::all());
        let request = DidCreateRequest::new(DidMethod::Ebsi)
            .with_options(DidEbsiResolveOptions { is_raw: true });
        assert!(dispatcher.create(&request).is_err());
    }

    #[test]
    fn routes_to_registered_adapter() {
        let dispatcher = DidDispatcher::new(MockDidService::all());
        let did = dispatcher
            .create(
                &DidCreateRequest::new(DidMethod::Web)
                    .with_key_alias("alice")
                    .with_options(DidWebCreateOptions {
                        domain: Some("example.com".to_string()),
                        ..Default::default()
                    }),
            )
            .unwrap();
        assert_eq!(did.method().unwrap(), DidMethod::Web);

        let document = dispatcher.resolve(&did, None).unwrap();
        assert_eq!(document["id"], did.as_str());
    }

    #[test]
    fn adapter_returning_wrong_method_is_backend_failure() {
        let dispatcher = DidDispatcher::new([Arc::new(Misbehaving) as Arc<dyn DidService>]);
        assert!(matches!(
            dispatcher.create(&DidCreateRequest::new(DidMethod::Web)),
            Err(DidServiceError::Backend { .. })
        ));
    }

    #[test]
    fn supports_and_methods() {
        let dispatcher = web_only();
        assert!(dispatcher.supports(DidMethod::Web));
        assert!(!dispatcher.supports(DidMethod::Key));
        assert_eq!(dispatcher.methods(), vec![DidMethod::Web]);
        assert_eq!(
            DidDispatcher::new(MockDidService::all()).methods(),
            DidMethod::ALL.to_vec()
        );
        assert!(format!("{dispatcher:?}").contains("MockDidService"));
    }
}
