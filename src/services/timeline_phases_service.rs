use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::PagedResult,
    db::models::timeline::{
        NewTimelinePhase, TimelinePhaseChangeset, TimelinePhaseDto, TimelinePhaseInput,
        TimelinePhaseListInput,
    },
    db::repositories::timeline_phases::TimelinePhaseRepo,
    db::repositories::timelines::TimelineRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::timeline::validate_phase_input,
};

pub struct TimelinePhasesService;

impl CrudService for TimelinePhasesService {
    const NAME: &'static str = "TimelinePhase";

    type Dto = TimelinePhaseDto;
    type CreateInput = TimelinePhaseInput;
    type UpdateInput = TimelinePhaseInput;
    type ListInput = TimelinePhaseListInput;

    fn create(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        input: TimelinePhaseInput,
    ) -> Result<TimelinePhaseDto, AppError> {
        validate_phase_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if !TimelineRepo::exists(conn, input.timeline_id)? {
                return Err(AppError::not_found("Timeline"));
            }

            let phase = TimelinePhaseRepo::insert(
                conn,
                &NewTimelinePhase {
                    timeline_id: input.timeline_id,
                    name: input.name.trim().to_string(),
                    start_date: input.start_date,
                    end_date: input.end_date,
                },
            )?;
            Ok(phase.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: TimelinePhaseInput,
    ) -> Result<TimelinePhaseDto, AppError> {
        validate_phase_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            TimelinePhaseRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Timeline phase"))?;
            if !TimelineRepo::exists(conn, input.timeline_id)? {
                return Err(AppError::not_found("Timeline"));
            }

            let phase = TimelinePhaseRepo::update(
                conn,
                id,
                &TimelinePhaseChangeset {
                    timeline_id: input.timeline_id,
                    name: input.name.trim().to_string(),
                    start_date: input.start_date,
                    end_date: input.end_date,
                    updated_at: Utc::now(),
                },
            )?;
            Ok(phase.into())
        })
    }

    fn delete(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            TimelinePhaseRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Timeline phase"))?;
            TimelinePhaseRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<TimelinePhaseDto, AppError> {
        let phase = TimelinePhaseRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Timeline phase"))?;
        Ok(phase.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: TimelinePhaseListInput,
    ) -> Result<PagedResult<TimelinePhaseDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = TimelinePhaseRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(TimelinePhaseDto::from))
    }
}
