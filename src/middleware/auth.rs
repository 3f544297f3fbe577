use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::AuthUser;
use crate::db::repositories::users::UserRepo;
use crate::error::AppError;
use axum::{extract::State, http::Request, middleware::Next, response::Response};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub user_name: String,
    pub iss: String,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expires_in: u64,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_access_token(
        &self,
        user: &AuthUser,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
            iss: self.issuer.clone(),
            exp: now + self.expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

/// Requires a valid bearer token for an active user and attaches the
/// resulting [`AuthUser`] to the request extensions.
pub async fn auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::auth("Missing bearer token"))?;

    let claims = state.auth_service.verify_token(bearer.token()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AppError::auth("Invalid or expired token")
    })?;

    let pool = state.db.clone();
    let user_id = claims.sub;
    let user = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let mut conn = pool.get()?;
        Ok(UserRepo::find_by_id(&mut conn, user_id)?)
    })
    .await
    .map_err(|e| AppError::internal(&format!("Auth task failed: {}", e)))??;

    let user = match user {
        Some(u) if u.is_active => u,
        _ => return Err(AppError::auth("User not found or inactive")),
    };

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> AuthService {
        AuthService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_expires_in: 3600,
            issuer: "mveledziso".to_string(),
            bcrypt_cost: 4,
        })
    }

    fn user() -> AuthUser {
        AuthUser {
            id: uuid::Uuid::new_v4(),
            email: "pm@example.com".to_string(),
            user_name: "pm".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let auth = service("secret");
        let user = user();
        let token = auth.generate_access_token(&user).unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.user_name, "pm");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = service("one").generate_access_token(&user()).unwrap();
        assert!(service("two").verify_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(service("secret").verify_token("not.a.jwt").is_err());
    }
}
