use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{EntityKind, NotificationType, PersonType},
    db::models::api::PagedResult,
    db::models::assignment::{
        NewUserTeam, UserTeamChangeset, UserTeamDto, UserTeamInput, UserTeamListInput,
    },
    db::models::entity_ref::EntityRef,
    db::models::person::Person,
    db::models::team::Team,
    db::repositories::persons::PersonRepo,
    db::repositories::teams::TeamRepo,
    db::repositories::user_teams::UserTeamRepo,
    error::AppError,
    services::CrudService,
    services::audit,
    services::context::RequestContext,
    validation::validate_input,
};

pub struct UserTeamsService;

impl UserTeamsService {
    fn resolve(conn: &mut PgConnection, input: &UserTeamInput) -> Result<(Team, Person), AppError> {
        let team = TeamRepo::find_by_id(conn, input.team_id)?
            .ok_or_else(|| AppError::not_found("Team"))?;
        let member =
            PersonRepo::find_by_id_and_type(conn, input.team_member_id, PersonType::TeamMember)?
                .ok_or_else(|| AppError::not_found("Team member"))?;
        Ok((team, member))
    }
}

impl CrudService for UserTeamsService {
    const NAME: &'static str = "UserTeam";

    type Dto = UserTeamDto;
    type CreateInput = UserTeamInput;
    type UpdateInput = UserTeamInput;
    type ListInput = UserTeamListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: UserTeamInput,
    ) -> Result<UserTeamDto, AppError> {
        validate_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let (team, member) = Self::resolve(conn, &input)?;

            let row = UserTeamRepo::insert(
                conn,
                &NewUserTeam {
                    team_id: team.id,
                    team_member_id: member.id,
                    role: input.role,
                },
            )?;

            audit::notify(
                conn,
                ctx,
                member.user_id,
                NotificationType::TeamUpdate,
                format!("You have been added to team '{}' as {}", team.name, row.role),
                EntityRef::new(EntityKind::Team, team.id),
            )?;

            tracing::info!(
                request_id = %ctx.request_id,
                team_id = %team.id,
                team_member_id = %member.id,
                "Team member added"
            );
            Ok(row.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: UserTeamInput,
    ) -> Result<UserTeamDto, AppError> {
        validate_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            UserTeamRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("User team"))?;
            let (team, member) = Self::resolve(conn, &input)?;

            let row = UserTeamRepo::update(
                conn,
                id,
                &UserTeamChangeset {
                    team_id: team.id,
                    team_member_id: member.id,
                    role: input.role,
                    updated_at: Utc::now(),
                },
            )?;
            Ok(row.into())
        })
    }

    fn delete(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            UserTeamRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("User team"))?;
            UserTeamRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<UserTeamDto, AppError> {
        let row = UserTeamRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("User team"))?;
        Ok(row.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: UserTeamListInput,
    ) -> Result<PagedResult<UserTeamDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = UserTeamRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(UserTeamDto::from))
    }
}
