pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::config::{Config, LoggingConfig};
use crate::db::DbPool;
use crate::middleware::AuthService;
use crate::services::context::ServiceSettings;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub settings: ServiceSettings,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let auth_service = AuthService::new(&config.auth());
        let settings = ServiceSettings::from_config(&config);
        Self {
            db,
            config: Arc::new(config),
            auth_service,
            settings,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}
