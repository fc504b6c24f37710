//! Application state with repository-based storage.

use std::sync::Arc;

use anagrafe_core::storage::PersonRepository;

use crate::{config::Config, storage::FlatFileRepository};

/// Shared application state.
///
/// Cloned for each request handler; all record access goes through the
/// repository trait object. The repository owns the only durable state, so
/// nothing here can diverge from the file between requests.
#[derive(Clone)]
pub struct AppState {
    /// Person repository backed by the flat-file table.
    pub persons: Arc<dyn PersonRepository>,
}

impl AppState {
    /// Creates the state over the flat-file table at the configured path.
    pub fn new(config: &Config) -> Self {
        Self::with_repository(Arc::new(FlatFileRepository::new(config.csv_path.clone())))
    }

    /// Creates the state over an explicit repository.
    pub fn with_repository(persons: Arc<dyn PersonRepository>) -> Self {
        Self { persons }
    }
}
