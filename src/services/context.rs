use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::AppState;
use crate::config::Config;
use crate::db::models::AuthUser;
use crate::db::repositories::Page;
use crate::error::{AppError, AppResult};
use crate::middleware::extract_request_id;

/// Knobs the services need from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceSettings {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub bcrypt_cost: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 1000,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        let paging = config.paging();
        Self {
            default_page_size: paging.default_page_size,
            max_page_size: paging.max_page_size,
            bcrypt_cost: config.auth().bcrypt_cost,
        }
    }

    /// Resolves `skipCount`/`maxResultCount` into a page window. A missing
    /// size falls back to the default; an oversized one is clamped.
    pub fn page(&self, skip_count: Option<i64>, max_result_count: Option<i64>) -> AppResult<Page> {
        let offset = skip_count.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::validation("skipCount cannot be negative"));
        }

        let limit = match max_result_count {
            None => self.default_page_size,
            Some(n) if n <= 0 => {
                return Err(AppError::validation("maxResultCount must be greater than 0"));
            }
            Some(n) => n.min(self.max_page_size),
        };

        Ok(Page::new(offset, limit))
    }
}

/// Who is calling and under which settings. Passed explicitly into every
/// service operation.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub request_id: String,
    pub settings: ServiceSettings,
}

impl RequestContext {
    pub fn new(user_id: Uuid, settings: ServiceSettings) -> Self {
        Self {
            user_id,
            request_id: Uuid::new_v4().to_string(),
            settings,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let request_id =
            extract_request_id(&parts.headers).unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            user_id: user.id,
            request_id,
            settings: state.settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_paging_uses_defaults() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.page(None, None).unwrap(), Page::new(0, 10));
    }

    #[test]
    fn oversized_page_is_clamped() {
        let settings = ServiceSettings {
            max_page_size: 50,
            ..ServiceSettings::default()
        };
        assert_eq!(settings.page(Some(20), Some(500)).unwrap(), Page::new(20, 50));
    }

    #[test]
    fn negative_skip_and_non_positive_size_are_rejected() {
        let settings = ServiceSettings::default();
        assert!(settings.page(Some(-1), None).is_err());
        assert!(settings.page(None, Some(0)).is_err());
        assert!(settings.page(None, Some(-5)).is_err());
    }
}
