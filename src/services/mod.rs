pub mod activity_logs_service;
pub mod audit;
pub mod comments_service;
pub mod context;
pub mod documents_service;
pub mod milestones_service;
pub mod notifications_service;
pub mod persons_service;
pub mod project_duties_service;
pub mod projects_service;
pub mod teams_service;
pub mod timeline_phases_service;
pub mod timelines_service;
pub mod token_auth_service;
pub mod user_duties_service;
pub mod user_teams_service;

use diesel::PgConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::api::PagedResult;
use crate::error::AppResult;
use context::RequestContext;

pub use activity_logs_service::ActivityLogsService;
pub use comments_service::CommentsService;
pub use documents_service::DocumentsService;
pub use milestones_service::MilestonesService;
pub use notifications_service::NotificationsService;
pub use persons_service::{ProjectManagersService, TeamMembersService};
pub use project_duties_service::ProjectDutiesService;
pub use projects_service::ProjectsService;
pub use teams_service::TeamsService;
pub use timeline_phases_service::TimelinePhasesService;
pub use timelines_service::TimelinesService;
pub use token_auth_service::TokenAuthService;
pub use user_duties_service::UserDutiesService;
pub use user_teams_service::UserTeamsService;

/// The five operations every aggregate exposes. Each mutating call is
/// expected to run inside a single transaction on `conn`.
pub trait CrudService {
    /// Route segment under `/api/services/app/`.
    const NAME: &'static str;

    type Dto: Serialize + Send + 'static;
    type CreateInput: DeserializeOwned + Validate + Send + 'static;
    type UpdateInput: DeserializeOwned + Validate + Send + 'static;
    type ListInput: DeserializeOwned + Send + 'static;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: Self::CreateInput,
    ) -> AppResult<Self::Dto>;

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: Self::UpdateInput,
    ) -> AppResult<Self::Dto>;

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<()>;

    fn get(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> AppResult<Self::Dto>;

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: Self::ListInput,
    ) -> AppResult<PagedResult<Self::Dto>>;
}
