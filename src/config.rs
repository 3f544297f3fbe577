use crate::error::{AppError, AppResult};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_slow_request_ms")]
    pub slow_request_ms: u64,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_expires")]
    pub jwt_access_token_expires_in: u64,
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub slow_request_ms: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expires_in: u64,
    pub issuer: String,
    pub bcrypt_cost: u32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_slow_request_ms() -> u64 {
    1000
}
fn default_jwt_secret() -> String {
    "your-secret-key".to_string()
}
fn default_access_token_expires() -> u64 {
    86400
} // 1 day
fn default_jwt_issuer() -> String {
    "mveledziso".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_page_size() -> i64 {
    10
}
fn default_max_page_size() -> i64 {
    1000
}
fn default_bcrypt_cost() -> u32 {
    10
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret.is_empty() {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value".to_string(),
            ));
        }

        if self.jwt_access_token_expires_in == 0 {
            return Err(AppError::Config(
                "JWT_ACCESS_TOKEN_EXPIRES_IN must be > 0".to_string(),
            ));
        }

        if self.default_page_size <= 0 || self.max_page_size <= 0 {
            return Err(AppError::Config(
                "DEFAULT_PAGE_SIZE and MAX_PAGE_SIZE must be > 0".to_string(),
            ));
        }

        if self.default_page_size > self.max_page_size {
            return Err(AppError::Config(
                "DEFAULT_PAGE_SIZE cannot be greater than MAX_PAGE_SIZE".to_string(),
            ));
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: self.database_connection_timeout,
        }
    }

    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            host: self.server_host.clone(),
            port: self.server_port,
            cors_origins: self.cors_origins.clone(),
            slow_request_ms: self.slow_request_ms,
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_expires_in: self.jwt_access_token_expires_in,
            issuer: self.jwt_issuer.clone(),
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }

    pub fn paging(&self) -> PagingConfig {
        PagingConfig {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            database_url: "postgres://localhost/mveledziso".to_string(),
            database_max_connections: default_max_connections(),
            database_min_connections: default_min_connections(),
            database_connection_timeout: default_connection_timeout(),
            server_host: default_host(),
            server_port: default_port(),
            cors_origins: default_cors_origins(),
            slow_request_ms: default_slow_request_ms(),
            jwt_secret: "test-secret".to_string(),
            jwt_access_token_expires_in: default_access_token_expires(),
            jwt_issuer: default_jwt_issuer(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn defaults_with_secret_are_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn placeholder_jwt_secret_is_rejected() {
        let mut config = valid_config();
        config.jwt_secret = default_jwt_secret();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn min_connections_above_max_is_rejected() {
        let mut config = valid_config();
        config.database_min_connections = config.database_max_connections + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_page_size_above_max_is_rejected() {
        let mut config = valid_config();
        config.default_page_size = 50;
        config.max_page_size = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn accessors_project_fields() {
        let config = valid_config();
        assert_eq!(config.server_address(), "127.0.0.1:8000");
        assert_eq!(config.paging().default_page_size, 10);
        assert_eq!(config.auth().issuer, "mveledziso");
        assert_eq!(config.database().max_connections, 20);
    }
}
