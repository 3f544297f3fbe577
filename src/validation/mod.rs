pub mod auth;
pub mod comment;
pub mod person;
pub mod project;
pub mod team;
pub mod timeline;

use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query},
    http::{Request, request::Parts},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

/// JSON body extractor that runs the `validator` rules before the handler.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(
                |rejection| AppError::validation(format!("Invalid JSON format: {}", rejection)),
            )?;

        validate_input(&value)?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor whose rejections use the API error envelope.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(
                |rejection| AppError::validation(format!("Invalid query string: {}", rejection)),
            )?;
        Ok(QueryParams(value))
    }
}

/// Runs the derived rules and folds every failure into one message.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| AppError::validation(join_errors(&errors)))
}

fn join_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// `end` must fall strictly after `start`.
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>, what: &str) -> AppResult<()> {
    if end <= start {
        return Err(AppError::validation(format!(
            "{} end date must be after its start date",
            what
        )));
    }
    Ok(())
}

/// Rejects strings that are empty after trimming.
pub fn require_text(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    #[test]
    fn all_field_messages_are_joined() {
        let sample = Sample {
            name: String::new(),
            email: "nope".to_string(),
        };
        let err = validate_input(&sample).unwrap_err();
        match err {
            AppError::Validation { message } => {
                assert_eq!(message, "Invalid email format; Name is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn valid_input_passes() {
        let sample = Sample {
            name: "Alpha".to_string(),
            email: "a@example.com".to_string(),
        };
        assert!(validate_input(&sample).is_ok());
    }

    #[test]
    fn date_range_requires_strictly_later_end() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(validate_date_range(start, end, "Project").is_ok());
        assert!(validate_date_range(start, start, "Project").is_err());
        assert!(validate_date_range(end, start, "Project").is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("  ", "Name is required").is_err());
        assert!(require_text("x", "Name is required").is_ok());
    }
}
