//! Handlers shared by every aggregate. Each one resolves the caller, hands
//! the input to the service on the blocking pool and wraps the result in the
//! response envelope.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    AppState,
    db::models::api::{ApiResponse, IdQuery},
    error::AppResult,
    routes::with_conn,
    services::{CrudService, context::RequestContext},
    validation::{QueryParams, ValidatedJson},
};

/// `Update` body: the target id next to the aggregate's update fields.
#[derive(Deserialize, Debug)]
pub struct UpdateRequest<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub input: T,
}

impl<T: Validate> Validate for UpdateRequest<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.input.validate()
    }
}

pub async fn create<S>(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<S::CreateInput>,
) -> AppResult<impl IntoResponse>
where
    S: CrudService + 'static,
{
    let dto = with_conn(&state, move |conn| S::create(conn, &ctx, input)).await?;
    let message = format!("{} created successfully", S::NAME);
    Ok((StatusCode::CREATED, Json(ApiResponse::created(dto, &message))))
}

pub async fn update<S>(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(body): ValidatedJson<UpdateRequest<S::UpdateInput>>,
) -> AppResult<impl IntoResponse>
where
    S: CrudService + 'static,
{
    let UpdateRequest { id, input } = body;
    let dto = with_conn(&state, move |conn| S::update(conn, &ctx, id, input)).await?;
    let message = format!("{} updated successfully", S::NAME);
    Ok((StatusCode::OK, Json(ApiResponse::success(dto, &message))))
}

pub async fn delete<S>(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    QueryParams(query): QueryParams<IdQuery>,
) -> AppResult<impl IntoResponse>
where
    S: CrudService + 'static,
{
    with_conn(&state, move |conn| S::delete(conn, &ctx, query.id)).await?;
    let message = format!("{} deleted successfully", S::NAME);
    Ok((StatusCode::OK, Json(ApiResponse::<()>::ok(&message))))
}

pub async fn get<S>(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    QueryParams(query): QueryParams<IdQuery>,
) -> AppResult<impl IntoResponse>
where
    S: CrudService + 'static,
{
    let dto = with_conn(&state, move |conn| S::get(conn, &ctx, query.id)).await?;
    let message = format!("{} retrieved successfully", S::NAME);
    Ok((StatusCode::OK, Json(ApiResponse::success(dto, &message))))
}

pub async fn get_list<S>(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    QueryParams(input): QueryParams<S::ListInput>,
) -> AppResult<impl IntoResponse>
where
    S: CrudService + 'static,
{
    let page = with_conn(&state, move |conn| S::get_list(conn, &ctx, input)).await?;
    let message = format!("{} list retrieved successfully", S::NAME);
    Ok((StatusCode::OK, Json(ApiResponse::success(page, &message))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::team::CreateTeamInput;

    #[test]
    fn update_request_reads_id_next_to_fields() {
        let id = Uuid::new_v4();
        let body = serde_json::json!({ "id": id, "name": "Alpha", "description": null });
        let request: UpdateRequest<CreateTeamInput> = serde_json::from_value(body).unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.input.name, "Alpha");
    }

    #[test]
    fn update_request_validates_inner_input() {
        let body = serde_json::json!({ "id": Uuid::new_v4(), "name": "" });
        let request: UpdateRequest<CreateTeamInput> = serde_json::from_value(body).unwrap();
        assert!(request.validate().is_err());
    }
}
