//! # vcreq-did
//!
//! Method-specific DID options and the dispatch layer in front of the
//! external DID service.
//!
//! - [`options`]: the closed [`DidOptions`] set, its validation and
//!   [`resolve_method`].
//! - [`service`]: the [`DidService`] adapter trait.
//! - [`dispatch`]: [`DidDispatcher`], one adapter per [`DidMethod`](vcreq_core::DidMethod).
//! - [`mock`]: [`MockDidService`] for development and tests.
//!
//! No DID-method logic lives here. Key handling and registry access belong
//! to the adapters.

pub mod dispatch;
pub mod mock;
pub mod options;
pub mod service;

pub use dispatch::DidDispatcher;
pub use mock::MockDidService;
pub use options::{
    resolve_method, DidCheqdCreateOptions, DidEbsiCreateOptions, DidEbsiResolveOptions,
    DidOptions, DidWebCreateOptions,
};
pub use service::{DidCreateRequest, DidService, DidServiceError};
