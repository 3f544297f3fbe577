use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::PagedResult,
    db::models::milestone::MilestoneDto,
    db::models::timeline::{
        NewTimeline, TimelineChangeset, TimelineDetailDto, TimelineDto, TimelineInput,
        TimelineListInput, TimelinePhaseDto,
    },
    db::repositories::milestones::MilestoneRepo,
    db::repositories::projects::ProjectsRepo,
    db::repositories::timeline_phases::TimelinePhaseRepo,
    db::repositories::timelines::TimelineRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::timeline::validate_timeline_input,
};

pub struct TimelinesService;

impl TimelinesService {
    /// The project's timeline with its phases (by start date) and
    /// milestones (by due date).
    pub fn get_by_project(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<TimelineDetailDto, AppError> {
        if !ProjectsRepo::exists(conn, project_id)? {
            return Err(AppError::not_found("Project"));
        }

        let timeline = TimelineRepo::find_by_project(conn, project_id)?
            .ok_or_else(|| AppError::not_found("Timeline"))?;
        let phases = TimelinePhaseRepo::list_by_timeline(conn, timeline.id)?;
        let milestones = MilestoneRepo::list_by_timeline(conn, timeline.id)?;

        Ok(TimelineDetailDto {
            timeline: timeline.into(),
            phases: phases.into_iter().map(TimelinePhaseDto::from).collect(),
            milestones: milestones.into_iter().map(MilestoneDto::from).collect(),
        })
    }
}

impl CrudService for TimelinesService {
    const NAME: &'static str = "Timeline";

    type Dto = TimelineDto;
    type CreateInput = TimelineInput;
    type UpdateInput = TimelineInput;
    type ListInput = TimelineListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: TimelineInput,
    ) -> Result<TimelineDto, AppError> {
        validate_timeline_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if !ProjectsRepo::exists(conn, input.project_id)? {
                return Err(AppError::not_found("Project"));
            }
            // One timeline per project; the unique index also guards this.
            if TimelineRepo::find_by_project(conn, input.project_id)?.is_some() {
                return Err(AppError::conflict_with_code(
                    "Project already has a timeline",
                    Some("projectId".to_string()),
                    "DUPLICATE",
                ));
            }

            let timeline = TimelineRepo::insert(
                conn,
                &NewTimeline {
                    project_id: input.project_id,
                    name: input.name.trim().to_string(),
                },
            )?;

            tracing::info!(
                request_id = %ctx.request_id,
                timeline_id = %timeline.id,
                project_id = %timeline.project_id,
                "Timeline created"
            );
            Ok(timeline.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: TimelineInput,
    ) -> Result<TimelineDto, AppError> {
        validate_timeline_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            TimelineRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Timeline"))?;
            if !ProjectsRepo::exists(conn, input.project_id)? {
                return Err(AppError::not_found("Project"));
            }

            let timeline = TimelineRepo::update(
                conn,
                id,
                &TimelineChangeset {
                    project_id: input.project_id,
                    name: input.name.trim().to_string(),
                    updated_at: Utc::now(),
                },
            )?;
            Ok(timeline.into())
        })
    }

    fn delete(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            TimelineRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Timeline"))?;
            TimelineRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<TimelineDto, AppError> {
        let timeline = TimelineRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Timeline"))?;
        Ok(timeline.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: TimelineListInput,
    ) -> Result<PagedResult<TimelineDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = TimelineRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(TimelineDto::from))
    }
}
