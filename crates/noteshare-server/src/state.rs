//! Application state shared across handlers.

use std::sync::Arc;

use noteshare_store::Store;

use crate::config::ServerConfig;
use crate::google::GoogleVerifier;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Database store.
    store: Arc<Store>,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Google ID token verifier.
    google: Arc<GoogleVerifier>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, config: ServerConfig) -> Self {
        let google = GoogleVerifier::new(config.google_client_id.clone());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            google: Arc::new(google),
        }
    }

    /// Get a reference to the database store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the Google token verifier.
    pub fn google(&self) -> &GoogleVerifier {
        &self.google
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
