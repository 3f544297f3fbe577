use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{EntityKind, NotificationType, PersonType},
    db::models::api::PagedResult,
    db::models::assignment::{NewUserDuty, UserDutyDto, UserDutyInput, UserDutyListInput},
    db::models::duty::ProjectDuty,
    db::models::entity_ref::EntityRef,
    db::models::person::Person,
    db::repositories::persons::PersonRepo,
    db::repositories::project_duties::ProjectDutyRepo,
    db::repositories::user_duties::UserDutyRepo,
    error::AppError,
    services::CrudService,
    services::audit,
    services::context::RequestContext,
    validation::validate_input,
};

pub struct UserDutiesService;

impl UserDutiesService {
    fn resolve(
        conn: &mut PgConnection,
        input: &UserDutyInput,
    ) -> Result<(ProjectDuty, Person), AppError> {
        let duty = ProjectDutyRepo::find_by_id(conn, input.project_duty_id)?
            .ok_or_else(|| AppError::not_found("Project duty"))?;
        let member =
            PersonRepo::find_by_id_and_type(conn, input.team_member_id, PersonType::TeamMember)?
                .ok_or_else(|| AppError::not_found("Team member"))?;
        Ok((duty, member))
    }

    fn notify_assignment(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        duty: &ProjectDuty,
        member: &Person,
    ) -> Result<(), AppError> {
        audit::notify(
            conn,
            ctx,
            member.user_id,
            NotificationType::DutyAssigned,
            format!("You have been assigned to duty '{}'", duty.title),
            EntityRef::new(EntityKind::ProjectDuty, duty.id),
        )
    }
}

impl CrudService for UserDutiesService {
    const NAME: &'static str = "UserDuty";

    type Dto = UserDutyDto;
    type CreateInput = UserDutyInput;
    type UpdateInput = UserDutyInput;
    type ListInput = UserDutyListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: UserDutyInput,
    ) -> Result<UserDutyDto, AppError> {
        validate_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let (duty, member) = Self::resolve(conn, &input)?;

            let row = UserDutyRepo::insert(
                conn,
                &NewUserDuty {
                    project_duty_id: duty.id,
                    team_member_id: member.id,
                },
            )?;

            Self::notify_assignment(conn, ctx, &duty, &member)?;

            tracing::info!(
                request_id = %ctx.request_id,
                duty_id = %duty.id,
                team_member_id = %member.id,
                "Duty assigned"
            );
            Ok(row.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UserDutyInput,
    ) -> Result<UserDutyDto, AppError> {
        validate_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing = UserDutyRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("User duty"))?;
            let (duty, member) = Self::resolve(conn, &input)?;

            let row = UserDutyRepo::update(
                conn,
                id,
                &NewUserDuty {
                    project_duty_id: duty.id,
                    team_member_id: member.id,
                },
            )?;

            if existing.team_member_id != member.id || existing.project_duty_id != duty.id {
                Self::notify_assignment(conn, ctx, &duty, &member)?;
            }
            Ok(row.into())
        })
    }

    fn delete(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            UserDutyRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("User duty"))?;
            UserDutyRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<UserDutyDto, AppError> {
        let row = UserDutyRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("User duty"))?;
        Ok(row.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: UserDutyListInput,
    ) -> Result<PagedResult<UserDutyDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = UserDutyRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(UserDutyDto::from))
    }
}
