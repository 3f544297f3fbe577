use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    AppState,
    db::models::{api::ApiResponse, timeline::ProjectIdQuery},
    error::AppResult,
    routes::with_conn,
    services::{TimelinesService, context::RequestContext},
    validation::QueryParams,
};

/// The project's timeline together with its phases and milestones.
pub async fn get_by_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    QueryParams(query): QueryParams<ProjectIdQuery>,
) -> AppResult<impl IntoResponse> {
    let detail = with_conn(&state, move |conn| {
        TimelinesService::get_by_project(conn, &ctx, query.project_id)
    })
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(detail, "Timeline retrieved successfully"))))
}
