use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::EntityKind,
    db::models::api::PagedResult,
    db::models::entity_ref::EntityRef,
    db::models::team::{
        CreateTeamInput, NewTeam, TeamChangeset, TeamDto, TeamListInput, UpdateTeamInput,
    },
    db::repositories::teams::TeamRepo,
    error::AppError,
    services::CrudService,
    services::audit::{self, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED},
    services::context::RequestContext,
    validation::team::validate_team_input,
};

pub struct TeamsService;

impl CrudService for TeamsService {
    const NAME: &'static str = "Team";

    type Dto = TeamDto;
    type CreateInput = CreateTeamInput;
    type UpdateInput = UpdateTeamInput;
    type ListInput = TeamListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateTeamInput,
    ) -> Result<TeamDto, AppError> {
        validate_team_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let team = TeamRepo::insert(
                conn,
                &NewTeam {
                    name: input.name.trim().to_string(),
                    description: input.description,
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Team, team.id),
                ACTION_CREATED,
                Some(format!("Team '{}' created", team.name)),
            )?;

            tracing::info!(request_id = %ctx.request_id, team_id = %team.id, "Team created");
            Ok(team.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateTeamInput,
    ) -> Result<TeamDto, AppError> {
        validate_team_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            TeamRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Team"))?;

            let team = TeamRepo::update(
                conn,
                id,
                &TeamChangeset {
                    name: input.name.trim().to_string(),
                    description: input.description,
                    updated_at: Utc::now(),
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Team, id),
                ACTION_UPDATED,
                None,
            )?;
            Ok(team.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let team = TeamRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Team"))?;

            // Restricted while any project still points at the team.
            TeamRepo::delete_by_id(conn, id)?;

            audit::record_activity(
                conn,
                ctx,
                EntityRef::new(EntityKind::Team, id),
                ACTION_DELETED,
                Some(format!("Team '{}' deleted", team.name)),
            )?;

            tracing::info!(request_id = %ctx.request_id, team_id = %id, "Team deleted");
            Ok(())
        })
    }

    fn get(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<TeamDto, AppError> {
        let team = TeamRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Team"))?;
        Ok(team.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: TeamListInput,
    ) -> Result<PagedResult<TeamDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = TeamRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(TeamDto::from))
    }
}
