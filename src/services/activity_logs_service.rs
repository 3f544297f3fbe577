use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::activity_log::{
        ActivityLog, ActivityLogChangeset, ActivityLogDto, ActivityLogListInput,
        CreateActivityLogInput, NewActivityLog, UpdateActivityLogInput,
    },
    db::models::api::PagedResult,
    db::models::entity_ref::EntityRef,
    db::repositories::activity_logs::ActivityLogRepo,
    db::repositories::entity_refs::EntityRefRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::{require_text, validate_input},
};

pub struct ActivityLogsService;

impl ActivityLogsService {
    /// Audit rows may only be changed by the user who recorded them.
    fn find_own(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ActivityLog, AppError> {
        let log = ActivityLogRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Activity log"))?;
        if log.user_id != ctx.user_id {
            return Err(AppError::forbidden("Only the recording user can change an activity log"));
        }
        Ok(log)
    }
}

impl CrudService for ActivityLogsService {
    const NAME: &'static str = "ActivityLog";

    type Dto = ActivityLogDto;
    type CreateInput = CreateActivityLogInput;
    type UpdateInput = UpdateActivityLogInput;
    type ListInput = ActivityLogListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateActivityLogInput,
    ) -> Result<ActivityLogDto, AppError> {
        validate_input(&input)?;
        require_text(&input.action, "Action is required")?;

        let target = EntityRef::new(input.entity_type, input.entity_id);

        conn.transaction::<_, AppError, _>(|conn| {
            if !EntityRefRepo::exists(conn, target)? {
                return Err(AppError::not_found(target.kind.to_string()));
            }

            let log = ActivityLogRepo::insert(
                conn,
                &NewActivityLog {
                    user_id: ctx.user_id,
                    entity_type: target.kind,
                    entity_id: target.id,
                    action: input.action.trim().to_string(),
                    details: input.details,
                },
            )?;
            Ok(log.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateActivityLogInput,
    ) -> Result<ActivityLogDto, AppError> {
        validate_input(&input)?;
        require_text(&input.action, "Action is required")?;

        conn.transaction::<_, AppError, _>(|conn| {
            Self::find_own(conn, ctx, id)?;

            let log = ActivityLogRepo::update(
                conn,
                id,
                &ActivityLogChangeset {
                    action: input.action.trim().to_string(),
                    details: input.details,
                    updated_at: Utc::now(),
                },
            )?;
            Ok(log.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::find_own(conn, ctx, id)?;
            ActivityLogRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ActivityLogDto, AppError> {
        let log = ActivityLogRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Activity log"))?;
        Ok(log.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: ActivityLogListInput,
    ) -> Result<PagedResult<ActivityLogDto>, AppError> {
        if let (Some(from), Some(to)) = (input.from, input.to) {
            if to < from {
                return Err(AppError::validation("'to' must not be before 'from'"));
            }
        }
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = ActivityLogRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(ActivityLogDto::from))
    }
}
