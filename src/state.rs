//! Application state shared by every command.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::TokenStore;

/// State handed to each command. The API client owns the token store and
/// reads it on every request; `tokens()` borrows it from there.
pub struct AppState {
    pub api: Arc<ApiClient>,
}

impl AppState {
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api: Arc::new(ApiClient::new(&config.client_config(), tokens)),
        }
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.api.tokens().as_ref()
    }
}
