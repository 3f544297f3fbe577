use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

// User models
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password_hash: String,
}

/// The caller identity attached to a request by the auth middleware.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::auth("Unauthorized"))
    }
}

// Authentication DTOs
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    #[validate(length(min = 1, max = 256, message = "User name or email is required"))]
    pub user_name_or_email_address: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 256,
        message = "User name must be between 1 and 256 characters"
    ))]
    pub user_name: String,

    #[validate(email(message = "Invalid email format"), length(max = 256))]
    pub email_address: String,

    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Surname must be between 1 and 64 characters"))]
    pub surname: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResult {
    pub access_token: String,
    pub expire_in_seconds: u64,
    pub user_id: Uuid,
}
