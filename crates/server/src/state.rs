//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::{JsonStore, MessageRepository, StoreError, TestimonialRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the flat-file store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: JsonStore,
}

impl AppState {
    /// Create a new application state, opening (or creating) the data file
    /// named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be created or parsed.
    pub async fn new(config: ServerConfig) -> Result<Self, StoreError> {
        let store = JsonStore::open(config.data_file.clone()).await?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, store }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the flat-file store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }

    /// Repository for contact messages.
    #[must_use]
    pub fn messages(&self) -> MessageRepository<'_> {
        MessageRepository::new(&self.inner.store)
    }

    /// Repository for testimonials.
    #[must_use]
    pub fn testimonials(&self) -> TestimonialRepository<'_> {
        TestimonialRepository::new(&self.inner.store)
    }
}
