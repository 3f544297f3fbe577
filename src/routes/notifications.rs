use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    AppState,
    db::models::api::{ApiResponse, IdQuery},
    error::AppResult,
    routes::with_conn,
    services::{NotificationsService, context::RequestContext},
    validation::QueryParams,
};

pub async fn mark_as_read(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    QueryParams(query): QueryParams<IdQuery>,
) -> AppResult<impl IntoResponse> {
    let notification = with_conn(&state, move |conn| {
        NotificationsService::mark_as_read(conn, &ctx, query.id)
    })
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(notification, "Notification marked as read"))))
}

pub async fn mark_all_as_read(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> AppResult<impl IntoResponse> {
    let updated = with_conn(&state, move |conn| {
        NotificationsService::mark_all_as_read(conn, &ctx)
    })
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(updated, "All notifications marked as read"))))
}

pub async fn get_unread_count(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> AppResult<impl IntoResponse> {
    let unread = with_conn(&state, move |conn| {
        NotificationsService::get_unread_count(conn, &ctx)
    })
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(unread, "Unread count retrieved successfully"))))
}
