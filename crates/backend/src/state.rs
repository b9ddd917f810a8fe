use std::sync::Arc;

use crate::shared::config::Config;
use crate::system::auth::jwt::JwtKeys;
use crate::system::users::repository::UserStore;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub keys: Arc<JwtKeys>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Create a new app state. Fails if the signing configuration is incomplete.
    pub fn new(config: Config, users: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        let keys = JwtKeys::from_config(&config.jwt)?;
        Ok(Self {
            config: Arc::new(config),
            keys: Arc::new(keys),
            users,
        })
    }
}
