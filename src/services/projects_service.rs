use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{EntityKind, PersonType},
    db::models::api::PagedResult,
    db::models::entity_ref::EntityRef,
    db::models::project::{
        CreateProjectInput, NewProject, ProjectChangeset, ProjectDto, ProjectListInput,
        UpdateProjectInput,
    },
    db::repositories::persons::PersonRepo,
    db::repositories::projects::ProjectsRepo,
    db::repositories::teams::TeamRepo,
    error::AppError,
    services::CrudService,
    services::audit::{self, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED},
    services::context::RequestContext,
    validation::project::validate_project_input,
};

pub struct ProjectsService;

impl ProjectsService {
    /// The team must exist and the manager must be a ProjectManager person.
    fn check_references(
        conn: &mut PgConnection,
        input: &CreateProjectInput,
    ) -> Result<(), AppError> {
        if !TeamRepo::exists(conn, input.team_id)? {
            return Err(AppError::not_found("Team"));
        }
        if !PersonRepo::exists_with_type(
            conn,
            input.project_manager_id,
            PersonType::ProjectManager,
        )? {
            return Err(AppError::not_found("Project manager"));
        }
        Ok(())
    }
}

impl CrudService for ProjectsService {
    const NAME: &'static str = "Project";

    type Dto = ProjectDto;
    type CreateInput = CreateProjectInput;
    type UpdateInput = UpdateProjectInput;
    type ListInput = ProjectListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateProjectInput,
    ) -> Result<ProjectDto, AppError> {
        validate_project_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            Self::check_references(conn, &input)?;

            let project = ProjectsRepo::insert(
                conn,
                &NewProject {
                    team_id: input.team_id,
                    project_manager_id: input.project_manager_id,
                    name: input.name.trim().to_string(),
                    description: input.description,
                    start_date: input.start_date,
                    end_date: input.end_date,
                    is_collaboration: input.is_collaboration,
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Project, project.id),
                ACTION_CREATED,
                Some(format!("Project '{}' created", project.name)),
            )?;

            tracing::info!(
                request_id = %ctx.request_id,
                project_id = %project.id,
                team_id = %project.team_id,
                "Project created"
            );
            Ok(project.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateProjectInput,
    ) -> Result<ProjectDto, AppError> {
        validate_project_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            ProjectsRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Project"))?;
            Self::check_references(conn, &input)?;

            let project = ProjectsRepo::update(
                conn,
                id,
                &ProjectChangeset {
                    team_id: input.team_id,
                    project_manager_id: input.project_manager_id,
                    name: input.name.trim().to_string(),
                    description: input.description,
                    start_date: input.start_date,
                    end_date: input.end_date,
                    is_collaboration: input.is_collaboration,
                    updated_at: Utc::now(),
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Project, id),
                ACTION_UPDATED,
                None,
            )?;
            Ok(project.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let project = ProjectsRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Project"))?;

            // Duties, the timeline and everything under them cascade.
            ProjectsRepo::delete_by_id(conn, id)?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Project, id),
                ACTION_DELETED,
                Some(format!("Project '{}' deleted", project.name)),
            )?;

            tracing::info!(request_id = %ctx.request_id, project_id = %id, "Project deleted");
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ProjectDto, AppError> {
        let project = ProjectsRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        Ok(project.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: ProjectListInput,
    ) -> Result<PagedResult<ProjectDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = ProjectsRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(ProjectDto::from))
    }
}
