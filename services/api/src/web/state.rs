//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::{HmacTokenAdapter, InMemoryCatalog, InMemoryUsers};
use crate::config::Config;
use bookstore_core::ports::{CatalogService, TokenService, UserService};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub users: Arc<dyn UserService>,
    pub tokens: Arc<dyn TokenService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds a state backed by the in-memory stores, with the seed catalog
    /// loaded and the token secret taken from `config`.
    pub fn in_memory(config: Arc<Config>) -> Self {
        let tokens = HmacTokenAdapter::new(config.token_secret.as_bytes(), config.token_ttl);
        Self {
            catalog: Arc::new(InMemoryCatalog::seeded()),
            users: Arc::new(InMemoryUsers::new()),
            tokens: Arc::new(tokens),
            config,
        }
    }
}
