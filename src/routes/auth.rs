use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{AuthenticateRequest, RegisterRequest},
    },
    error::AppResult,
    routes::with_conn,
    services::TokenAuthService,
    validation::ValidatedJson,
};

pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<AuthenticateRequest>,
) -> AppResult<impl IntoResponse> {
    let start_time = Instant::now();
    let auth_service = state.auth_service.clone();

    let result = with_conn(&state, move |conn| {
        TokenAuthService::authenticate(conn, &auth_service, &payload)
    })
    .await?;

    tracing::debug!(
        user_id = %result.user_id,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Authentication completed"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(result, "Authenticated successfully"))))
}

/// Public sign-up; the only way to obtain the first account on an empty
/// database.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let auth_service = state.auth_service.clone();
    let bcrypt_cost = state.settings.bcrypt_cost;

    let result = with_conn(&state, move |conn| {
        TokenAuthService::register(conn, &auth_service, bcrypt_cost, &payload)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(result, "User registered successfully")),
    ))
}
