use std::sync::Arc;

use jobly_config::{CorsConfig, JwtConfig};
use jobly_db::{DataStore, PgDataStore, PgPool};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// State backed by PostgreSQL, with configuration read from the environment.
pub fn init_app_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgDataStore::new(pool)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    )
}
