use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::RunQueryDsl;
use serde::Serialize;

use crate::{AppState, db::models::api::ApiResponse, routes::with_conn};

#[derive(Serialize, Debug)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a `SELECT 1` round trip through the pool.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = with_conn(&state, |conn| {
        diesel::sql_query("SELECT 1").execute(conn)?;
        Ok(())
    })
    .await;

    match database {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                HealthStatus { status: "ok", database: "ok" },
                "Service is healthy",
            )),
        ),
        Err(e) => {
            tracing::warn!(error = %e.chain_message(), "Health check failed");
            let mut response = ApiResponse::success(
                HealthStatus { status: "degraded", database: "unavailable" },
                "Database is unavailable",
            );
            response.success = false;
            response.code = StatusCode::SERVICE_UNAVAILABLE.as_u16();
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}
