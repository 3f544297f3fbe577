pub mod auth;
pub mod crud;
pub mod health;
pub mod notifications;
pub mod timelines;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use diesel::PgConnection;
use tokio::task;

use crate::{
    AppState,
    error::{AppError, AppResult},
    middleware::{auth_middleware, request_tracking_middleware},
    services::{
        ActivityLogsService, CommentsService, CrudService, DocumentsService, MilestonesService,
        NotificationsService, ProjectDutiesService, ProjectManagersService, ProjectsService,
        TeamMembersService, TeamsService, TimelinePhasesService, TimelinesService,
        UserDutiesService, UserTeamsService,
    },
};

/// Prefix shared by every application service route.
pub const APP_SERVICES_PREFIX: &str = "/api/services/app";

/// Runs a blocking database closure on a pooled connection.
pub async fn with_conn<T, F>(state: &AppState, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let pool = state.db.clone();
    task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::internal(format!("Database task failed: {}", e)))?
}

/// `Create`, `Update`, `Delete`, `Get` and `GetList` for one service.
pub fn crud_routes<S>() -> Router<Arc<AppState>>
where
    S: CrudService + 'static,
{
    let base = format!("{}/{}", APP_SERVICES_PREFIX, S::NAME);
    Router::new()
        .route(&format!("{}/Create", base), post(crud::create::<S>))
        .route(&format!("{}/Update", base), put(crud::update::<S>))
        .route(&format!("{}/Delete", base), delete(crud::delete::<S>))
        .route(&format!("{}/Get", base), get(crud::get::<S>))
        .route(&format!("{}/GetList", base), get(crud::get_list::<S>))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let app_routes = Router::new()
        .merge(crud_routes::<TeamsService>())
        .merge(crud_routes::<TeamMembersService>())
        .merge(crud_routes::<ProjectManagersService>())
        .merge(crud_routes::<ProjectsService>())
        .merge(crud_routes::<ProjectDutiesService>())
        .merge(crud_routes::<UserDutiesService>())
        .merge(crud_routes::<UserTeamsService>())
        .merge(crud_routes::<TimelinesService>())
        .merge(crud_routes::<TimelinePhasesService>())
        .merge(crud_routes::<MilestonesService>())
        .merge(crud_routes::<DocumentsService>())
        .merge(crud_routes::<CommentsService>())
        .merge(crud_routes::<NotificationsService>())
        .merge(crud_routes::<ActivityLogsService>())
        .route(
            "/api/services/app/Timeline/GetByProject",
            get(timelines::get_by_project),
        )
        .route(
            "/api/services/app/Notification/MarkAsRead",
            post(notifications::mark_as_read),
        )
        .route(
            "/api/services/app/Notification/MarkAllAsRead",
            post(notifications::mark_all_as_read),
        )
        .route(
            "/api/services/app/Notification/GetUnreadCount",
            get(notifications::get_unread_count),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    // Sign-up, token issuing and health checks stay outside the auth layer.
    let public_routes = Router::new()
        .route("/api/TokenAuth/Authenticate", post(auth::authenticate))
        .route("/api/TokenAuth/Register", post(auth::register))
        .route("/health", get(health::health));

    Router::new()
        .merge(public_routes)
        .merge(app_routes)
        .layer(from_fn_with_state(state.clone(), request_tracking_middleware))
        .with_state(state)
}
