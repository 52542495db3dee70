use crate::config::AppConfig;
use crate::store::{FlashQueue, LinkStore, UserDirectory};
use crate::utils::jwt::SessionKeys;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub links: LinkStore,
    pub users: UserDirectory,
    pub flash: FlashQueue,
    pub sessions: SessionKeys,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            links: LinkStore::new(),
            users: UserDirectory::new(config.bcrypt_cost),
            flash: FlashQueue::new(),
            sessions: SessionKeys::from_config(
                config.session_secret.as_deref(),
                config.session_ttl_days,
            ),
            config,
        }
    }
}
