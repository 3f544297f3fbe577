pub mod enums;
pub mod models;
pub mod repositories;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use std::time::Duration;

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

pub fn build_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(&config.url);
    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .map_err(|e| AppError::Config(format!("Failed to create database connection pool: {}", e)))
}
