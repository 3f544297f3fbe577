use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::EntityKind,
    db::models::api::PagedResult,
    db::models::duty::{
        CreateProjectDutyInput, NewProjectDuty, ProjectDutyChangeset, ProjectDutyDto,
        ProjectDutyListInput, UpdateProjectDutyInput,
    },
    db::models::entity_ref::EntityRef,
    db::repositories::project_duties::ProjectDutyRepo,
    db::repositories::projects::ProjectsRepo,
    error::AppError,
    services::CrudService,
    services::audit::{self, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED},
    services::context::RequestContext,
    validation::project::validate_duty_input,
};

pub struct ProjectDutiesService;

impl CrudService for ProjectDutiesService {
    const NAME: &'static str = "ProjectDuty";

    type Dto = ProjectDutyDto;
    type CreateInput = CreateProjectDutyInput;
    type UpdateInput = UpdateProjectDutyInput;
    type ListInput = ProjectDutyListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateProjectDutyInput,
    ) -> Result<ProjectDutyDto, AppError> {
        validate_duty_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if !ProjectsRepo::exists(conn, input.project_id)? {
                return Err(AppError::not_found("Project"));
            }

            let duty = ProjectDutyRepo::insert(
                conn,
                &NewProjectDuty {
                    project_id: input.project_id,
                    title: input.title.trim().to_string(),
                    description: input.description,
                    status: input.status,
                    priority: input.priority,
                    due_date: input.due_date,
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::ProjectDuty, duty.id),
                ACTION_CREATED,
                Some(format!("Duty '{}' created", duty.title)),
            )?;
            Ok(duty.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateProjectDutyInput,
    ) -> Result<ProjectDutyDto, AppError> {
        validate_duty_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing = ProjectDutyRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Project duty"))?;
            if !ProjectsRepo::exists(conn, input.project_id)? {
                return Err(AppError::not_found("Project"));
            }

            let duty = ProjectDutyRepo::update(
                conn,
                id,
                &ProjectDutyChangeset {
                    project_id: input.project_id,
                    title: input.title.trim().to_string(),
                    description: input.description,
                    status: input.status,
                    priority: input.priority,
                    due_date: input.due_date,
                    updated_at: Utc::now(),
                },
            )?;

            let details = (existing.status != duty.status)
                .then(|| format!("Status changed from {} to {}", existing.status, duty.status));
            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::ProjectDuty, id),
                ACTION_UPDATED,
                details,
            )?;
            Ok(duty.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let duty = ProjectDutyRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Project duty"))?;

            ProjectDutyRepo::delete_by_id(conn, id)?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::ProjectDuty, id),
                ACTION_DELETED,
                Some(format!("Duty '{}' deleted", duty.title)),
            )?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ProjectDutyDto, AppError> {
        let duty = ProjectDutyRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Project duty"))?;
        Ok(duty.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: ProjectDutyListInput,
    ) -> Result<PagedResult<ProjectDutyDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = ProjectDutyRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(ProjectDutyDto::from))
    }
}
