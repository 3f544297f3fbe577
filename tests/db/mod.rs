//! Service tests against a migrated PostgreSQL database. Each test runs in a
//! transaction that is never committed. Run with
//! `DATABASE_URL=... cargo test -- --ignored`.

mod access;
mod services;

use chrono::{TimeZone, Utc};
use diesel::{Connection, PgConnection};
use mveledziso_backend::db::enums::MemberRole;
use mveledziso_backend::db::models::{
    CreatePersonInput, CreateProjectInput, CreateTeamInput, NewUser, PersonDto, ProjectDto, TeamDto,
};
use mveledziso_backend::db::repositories::users::UserRepo;
use mveledziso_backend::services::context::{RequestContext, ServiceSettings};
use mveledziso_backend::services::{
    CrudService, ProjectManagersService, ProjectsService, TeamMembersService, TeamsService,
};
use uuid::Uuid;

pub fn connection() -> PgConnection {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let mut conn = PgConnection::establish(&url).expect("Failed to connect to database");
    conn.begin_test_transaction()
        .expect("Failed to begin test transaction");
    conn
}

fn settings() -> ServiceSettings {
    ServiceSettings {
        default_page_size: 10,
        max_page_size: 100,
        bcrypt_cost: 4,
    }
}

/// A fresh caller backed by a real user row.
pub fn caller(conn: &mut PgConnection) -> RequestContext {
    let tag = Uuid::new_v4().simple().to_string();
    let user = UserRepo::insert(
        conn,
        &NewUser {
            user_name: format!("caller-{}", tag),
            email: format!("caller-{}@example.com", tag),
            name: "Test".to_string(),
            surname: "Caller".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .expect("Failed to seed caller");
    RequestContext::new(user.id, settings())
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub fn team(conn: &mut PgConnection, ctx: &RequestContext, name: &str) -> TeamDto {
    TeamsService::create(
        conn,
        ctx,
        CreateTeamInput {
            name: name.to_string(),
            description: None,
        },
    )
    .expect("Failed to create team")
}

fn person_input(role: Option<MemberRole>) -> CreatePersonInput {
    let tag = Uuid::new_v4().simple().to_string();
    CreatePersonInput {
        first_name: "Lindiwe".to_string(),
        last_name: "Dube".to_string(),
        email: format!("person-{}@example.com", tag),
        password: "password123".to_string(),
        user_name: None,
        role,
    }
}

pub fn project_manager(conn: &mut PgConnection, ctx: &RequestContext) -> PersonDto {
    ProjectManagersService::create(conn, ctx, person_input(None))
        .expect("Failed to create project manager")
}

pub fn team_member(conn: &mut PgConnection, ctx: &RequestContext) -> PersonDto {
    TeamMembersService::create(conn, ctx, person_input(Some(MemberRole::Developer)))
        .expect("Failed to create team member")
}

pub fn project(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    team: &TeamDto,
    manager: &PersonDto,
    name: &str,
) -> ProjectDto {
    ProjectsService::create(
        conn,
        ctx,
        CreateProjectInput {
            name: name.to_string(),
            description: Some("Website redesign".to_string()),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            is_collaboration: false,
            team_id: team.id,
            project_manager_id: manager.id,
        },
    )
    .expect("Failed to create project")
}
