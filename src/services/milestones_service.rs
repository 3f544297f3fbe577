use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::EntityKind,
    db::models::api::PagedResult,
    db::models::entity_ref::EntityRef,
    db::models::milestone::{
        MilestoneChangeset, MilestoneDto, MilestoneInput, MilestoneListInput, NewMilestone,
    },
    db::repositories::milestones::MilestoneRepo,
    db::repositories::timelines::TimelineRepo,
    error::AppError,
    services::CrudService,
    services::audit::{self, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED},
    services::context::RequestContext,
    validation::timeline::validate_milestone_input,
};

pub struct MilestonesService;

impl CrudService for MilestonesService {
    const NAME: &'static str = "Milestone";

    type Dto = MilestoneDto;
    type CreateInput = MilestoneInput;
    type UpdateInput = MilestoneInput;
    type ListInput = MilestoneListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: MilestoneInput,
    ) -> Result<MilestoneDto, AppError> {
        validate_milestone_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if !TimelineRepo::exists(conn, input.timeline_id)? {
                return Err(AppError::not_found("Timeline"));
            }

            let milestone = MilestoneRepo::insert(
                conn,
                &NewMilestone {
                    timeline_id: input.timeline_id,
                    title: input.title.trim().to_string(),
                    description: input.description,
                    due_date: input.due_date,
                    is_completed: input.is_completed,
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Milestone, milestone.id),
                ACTION_CREATED,
                Some(format!("Milestone '{}' created", milestone.title)),
            )?;
            Ok(milestone.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: MilestoneInput,
    ) -> Result<MilestoneDto, AppError> {
        validate_milestone_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing = MilestoneRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Milestone"))?;
            if !TimelineRepo::exists(conn, input.timeline_id)? {
                return Err(AppError::not_found("Timeline"));
            }

            let milestone = MilestoneRepo::update(
                conn,
                id,
                &MilestoneChangeset {
                    timeline_id: input.timeline_id,
                    title: input.title.trim().to_string(),
                    description: input.description,
                    due_date: input.due_date,
                    is_completed: input.is_completed,
                    updated_at: Utc::now(),
                },
            )?;

            let details = (!existing.is_completed && milestone.is_completed)
                .then(|| "Marked as completed".to_string());
            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Milestone, id),
                ACTION_UPDATED,
                details,
            )?;
            Ok(milestone.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let milestone = MilestoneRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Milestone"))?;
            MilestoneRepo::delete_by_id(conn, id)?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Milestone, id),
                ACTION_DELETED,
                Some(format!("Milestone '{}' deleted", milestone.title)),
            )?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<MilestoneDto, AppError> {
        let milestone = MilestoneRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Milestone"))?;
        Ok(milestone.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: MilestoneListInput,
    ) -> Result<PagedResult<MilestoneDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = MilestoneRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(MilestoneDto::from))
    }
}
