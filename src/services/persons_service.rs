use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::PersonType,
    db::models::api::PagedResult,
    db::models::auth::NewUser,
    db::models::person::{
        CreatePersonInput, NewPerson, PersonChangeset, PersonDto, PersonListInput,
        UpdatePersonInput,
    },
    db::repositories::persons::PersonRepo,
    db::repositories::users::UserRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::person::{validate_create_person, validate_update_person},
};

/// Shared implementation for the two person subtypes, which live in the
/// same table and differ only in `person_type` and `role`.
struct PersonsService;

impl PersonsService {
    fn resource(kind: PersonType) -> &'static str {
        match kind {
            PersonType::TeamMember => "Team member",
            PersonType::ProjectManager => "Project manager",
        }
    }

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        kind: PersonType,
        input: CreatePersonInput,
    ) -> Result<PersonDto, AppError> {
        let person_kind = validate_create_person(kind, &input)?;

        let user_name = input
            .user_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(input.email.as_str())
            .to_string();
        let password_hash = bcrypt::hash(&input.password, ctx.settings.bcrypt_cost)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if UserRepo::exists_by_user_name(conn, &user_name)? {
                return Err(AppError::conflict_with_code(
                    "User name already exists",
                    Some("userName".to_string()),
                    "USER_NAME_EXISTS",
                ));
            }
            if UserRepo::exists_by_email(conn, &input.email)? {
                return Err(AppError::conflict_with_code(
                    "Email already exists",
                    Some("email".to_string()),
                    "USER_EMAIL_EXISTS",
                ));
            }

            let user = UserRepo::insert(
                conn,
                &NewUser {
                    user_name,
                    email: input.email.clone(),
                    name: input.first_name.trim().to_string(),
                    surname: input.last_name.trim().to_string(),
                    password_hash,
                },
            )?;

            let person = PersonRepo::insert(
                conn,
                &NewPerson {
                    user_id: user.id,
                    first_name: input.first_name.trim().to_string(),
                    last_name: input.last_name.trim().to_string(),
                    email: input.email,
                    person_type: person_kind.person_type(),
                    role: person_kind.role(),
                },
            )?;

            tracing::info!(
                request_id = %ctx.request_id,
                person_id = %person.id,
                person_type = %kind,
                "Person created"
            );
            Ok(person.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        kind: PersonType,
        id: Uuid,
        input: UpdatePersonInput,
    ) -> Result<PersonDto, AppError> {
        let person_kind = validate_update_person(kind, &input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing = PersonRepo::find_by_id_and_type(conn, id, kind)?
                .ok_or_else(|| AppError::not_found(Self::resource(kind)))?;

            let first_name = input.first_name.trim().to_string();
            let last_name = input.last_name.trim().to_string();

            UserRepo::update_profile(
                conn,
                existing.user_id,
                &input.email,
                &first_name,
                &last_name,
            )?;

            let person = PersonRepo::update(
                conn,
                id,
                &PersonChangeset {
                    first_name,
                    last_name,
                    email: input.email,
                    role: person_kind.role(),
                    updated_at: Utc::now(),
                },
            )?;
            Ok(person.into())
        })
    }

    fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        kind: PersonType,
        id: Uuid,
    ) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let person = PersonRepo::find_by_id_and_type(conn, id, kind)?
                .ok_or_else(|| AppError::not_found(Self::resource(kind)))?;

            // Memberships and assignments cascade; managed projects restrict.
            PersonRepo::delete_by_id(conn, id)?;
            UserRepo::delete_by_id(conn, person.user_id)?;

            tracing::info!(request_id = %ctx.request_id, person_id = %id, "Person deleted");
            Ok(())
        })
    }

    fn get(conn: &mut PgConnection, kind: PersonType, id: Uuid) -> Result<PersonDto, AppError> {
        let person = PersonRepo::find_by_id_and_type(conn, id, kind)?
            .ok_or_else(|| AppError::not_found(Self::resource(kind)))?;
        Ok(person.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        kind: PersonType,
        input: PersonListInput,
    ) -> Result<PagedResult<PersonDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = PersonRepo::list(conn, kind, &input, page)?;
        Ok(PagedResult::new(total, items).map(PersonDto::from))
    }
}

pub struct TeamMembersService;

impl CrudService for TeamMembersService {
    const NAME: &'static str = "TeamMember";

    type Dto = PersonDto;
    type CreateInput = CreatePersonInput;
    type UpdateInput = UpdatePersonInput;
    type ListInput = PersonListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreatePersonInput,
    ) -> Result<PersonDto, AppError> {
        PersonsService::create(conn, ctx, PersonType::TeamMember, input)
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: UpdatePersonInput,
    ) -> Result<PersonDto, AppError> {
        PersonsService::update(conn, PersonType::TeamMember, id, input)
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        PersonsService::delete(conn, ctx, PersonType::TeamMember, id)
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<PersonDto, AppError> {
        PersonsService::get(conn, PersonType::TeamMember, id)
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: PersonListInput,
    ) -> Result<PagedResult<PersonDto>, AppError> {
        PersonsService::get_list(conn, ctx, PersonType::TeamMember, input)
    }
}

pub struct ProjectManagersService;

impl CrudService for ProjectManagersService {
    const NAME: &'static str = "ProjectManager";

    type Dto = PersonDto;
    type CreateInput = CreatePersonInput;
    type UpdateInput = UpdatePersonInput;
    type ListInput = PersonListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreatePersonInput,
    ) -> Result<PersonDto, AppError> {
        PersonsService::create(conn, ctx, PersonType::ProjectManager, input)
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: UpdatePersonInput,
    ) -> Result<PersonDto, AppError> {
        PersonsService::update(conn, PersonType::ProjectManager, id, input)
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        PersonsService::delete(conn, ctx, PersonType::ProjectManager, id)
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<PersonDto, AppError> {
        PersonsService::get(conn, PersonType::ProjectManager, id)
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: PersonListInput,
    ) -> Result<PagedResult<PersonDto>, AppError> {
        // Role is a team-member attribute; managers never match a role filter.
        let input = PersonListInput { role: None, ..input };
        PersonsService::get_list(conn, ctx, PersonType::ProjectManager, input)
    }
}
