use diesel::prelude::*;

use crate::{
    db::models::auth::{AuthUser, AuthenticateRequest, AuthenticateResult, NewUser, RegisterRequest},
    db::repositories::users::UserRepo,
    error::AppError,
    middleware::auth::AuthService,
    validation::auth::{validate_authenticate_request, validate_register_request},
};

pub struct TokenAuthService;

impl TokenAuthService {
    /// Verifies the password of an active user and issues an access token.
    /// Unknown users and wrong passwords produce the same error.
    pub fn authenticate(
        conn: &mut PgConnection,
        auth: &AuthService,
        req: &AuthenticateRequest,
    ) -> Result<AuthenticateResult, AppError> {
        validate_authenticate_request(req)?;

        let login = req.user_name_or_email_address.trim();
        let user = UserRepo::find_by_user_name_or_email(conn, login)?
            .ok_or_else(|| AppError::auth("Invalid user name or password"))?;

        if !bcrypt::verify(&req.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::auth("Invalid user name or password"));
        }

        if !user.is_active {
            return Err(AppError::auth("User account is inactive"));
        }

        let user_id = user.id;
        let access_token = auth.generate_access_token(&AuthUser::from(user))?;

        tracing::info!(user_id = %user_id, "User authenticated");
        Ok(AuthenticateResult {
            access_token,
            expire_in_seconds: auth.expires_in(),
            user_id,
        })
    }

    /// Creates an active user with a bcrypt-hashed password and signs it in.
    pub fn register(
        conn: &mut PgConnection,
        auth: &AuthService,
        bcrypt_cost: u32,
        req: &RegisterRequest,
    ) -> Result<AuthenticateResult, AppError> {
        validate_register_request(req)?;

        let user_name = req.user_name.trim().to_string();
        let email = req.email_address.trim().to_string();
        let password_hash = bcrypt::hash(&req.password, bcrypt_cost)?;

        let user = conn.transaction::<_, AppError, _>(|conn| {
            if UserRepo::exists_by_user_name(conn, &user_name)? {
                return Err(AppError::conflict_with_code(
                    "User name already exists",
                    Some("userName".to_string()),
                    "USER_NAME_EXISTS",
                ));
            }
            if UserRepo::exists_by_email(conn, &email)? {
                return Err(AppError::conflict_with_code(
                    "Email already exists",
                    Some("emailAddress".to_string()),
                    "USER_EMAIL_EXISTS",
                ));
            }

            Ok(UserRepo::insert(
                conn,
                &NewUser {
                    user_name,
                    email,
                    name: req.name.trim().to_string(),
                    surname: req.surname.trim().to_string(),
                    password_hash,
                },
            )?)
        })?;

        let user_id = user.id;
        let access_token = auth.generate_access_token(&AuthUser::from(user))?;

        tracing::info!(user_id = %user_id, "User registered");
        Ok(AuthenticateResult {
            access_token,
            expire_in_seconds: auth.expires_in(),
            user_id,
        })
    }
}
