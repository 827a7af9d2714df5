//! # Application State
//!
//! Shared by all handlers through the `State` extractor. Everything in it
//! is read-only after startup, so cloning is a pair of `Arc` bumps.

use std::sync::Arc;

use vcreq_did::{DidDispatcher, MockDidService};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// DID method adapters.
    pub dids: Arc<DidDispatcher>,
}

impl AppState {
    pub fn new(config: AppConfig, dids: DidDispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dids: Arc::new(dids),
        }
    }

    /// State backed by [`MockDidService`] for every method.
    pub fn with_mock_services(config: AppConfig) -> Self {
        Self::new(config, DidDispatcher::new(MockDidService::all()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_mock_services(AppConfig::default())
    }
}
