use crate::db::models::api::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error")]
    Database(#[source] DieselError),

    #[error("Pool error")]
    Pool(#[from] r2d2::Error),

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
        code: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Classifies database failures so that missing rows and constraint
/// violations reach the caller as user-facing errors.
impl From<DieselError> for AppError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => AppError::not_found("record"),
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info) => {
                let constraint = info.constraint_name().unwrap_or("unknown").to_string();
                AppError::Conflict {
                    message: format!(
                        "The record is referenced by or references other records ({})",
                        constraint
                    ),
                    field: None,
                    code: Some("REFERENCE_CONSTRAINT".to_string()),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                let constraint = info.constraint_name().unwrap_or("unknown").to_string();
                AppError::Conflict {
                    message: format!(
                        "A record with the same values already exists ({})",
                        constraint
                    ),
                    field: None,
                    code: Some("DUPLICATE".to_string()),
                }
            }
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, response) = match self {
            AppError::Database(_) => {
                tracing::error!(error = %self.chain_message(), "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Database error"),
                )
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Connection error"),
                )
            }
            AppError::Auth { ref message } => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::<()>::unauthorized(message),
            ),
            AppError::Forbidden { ref message } => (
                StatusCode::FORBIDDEN,
                ApiResponse::<()>::forbidden(message),
            ),
            AppError::Validation { ref message } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::bad_request(message),
            ),
            AppError::NotFound { ref resource } => (
                StatusCode::NOT_FOUND,
                ApiResponse::<()>::not_found(&format!("{} not found", resource)),
            ),
            AppError::Conflict {
                ref message,
                ref field,
                ref code,
            } => (
                StatusCode::CONFLICT,
                ApiResponse::<()>::conflict(message, field.clone(), code.as_deref().unwrap_or("")),
            ),
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Configuration error"),
                )
            }
            AppError::Jwt(ref e) => {
                tracing::warn!("JWT error: {}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    ApiResponse::<()>::unauthorized("Invalid token"),
                )
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Password processing error"),
                )
            }
            AppError::Internal(ref message) => {
                tracing::error!(error = %self.chain_message(), "Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error(message),
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict_with_code(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            message: message.into(),
            field,
            code: Some(code.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Error code carried by a conflict, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Conflict { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The message of this error followed by every nested source, joined with
    /// `" ---> "`.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(inner) = source {
            message.push_str(" ---> ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: AppError = DieselError::NotFound.into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn other_diesel_errors_stay_database_errors() {
        let err: AppError = DieselError::RollbackTransaction.into();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn chain_message_without_sources_is_display() {
        let err = AppError::internal("boom");
        assert_eq!(err.chain_message(), "Internal server error: boom");
    }

    #[test]
    fn chain_message_names_each_source_once() {
        let err = AppError::Database(DieselError::RollbackTransaction);
        assert_eq!(
            err.chain_message(),
            format!("Database error ---> {}", DieselError::RollbackTransaction)
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::not_found("team"), StatusCode::NOT_FOUND),
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
            (AppError::auth("no"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("no"), StatusCode::FORBIDDEN),
            (
                AppError::conflict_with_code("dup", None, "DUPLICATE"),
                StatusCode::CONFLICT,
            ),
            (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
