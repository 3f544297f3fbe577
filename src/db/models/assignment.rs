use crate::db::enums::TeamRole;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// UserDuty: a team member assigned to a project duty.
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::user_duties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserDuty {
    pub id: Uuid,
    pub project_duty_id: Uuid,
    pub team_member_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_duties)]
pub struct NewUserDuty {
    pub project_duty_id: Uuid,
    pub team_member_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDutyDto {
    pub id: Uuid,
    pub project_duty_id: Uuid,
    pub team_member_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<UserDuty> for UserDutyDto {
    fn from(row: UserDuty) -> Self {
        Self {
            id: row.id,
            project_duty_id: row.project_duty_id,
            team_member_id: row.team_member_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDutyInput {
    pub project_duty_id: Uuid,
    pub team_member_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDutyListInput {
    pub project_duty_id: Option<Uuid>,
    pub team_member_id: Option<Uuid>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}

// UserTeam: membership of a team member in a team.
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::user_teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserTeam {
    pub id: Uuid,
    pub team_id: Uuid,
    pub team_member_id: Uuid,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_teams)]
pub struct NewUserTeam {
    pub team_id: Uuid,
    pub team_member_id: Uuid,
    pub role: TeamRole,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::user_teams)]
pub struct UserTeamChangeset {
    pub team_id: Uuid,
    pub team_member_id: Uuid,
    pub role: TeamRole,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserTeamDto {
    pub id: Uuid,
    pub team_id: Uuid,
    pub team_member_id: Uuid,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserTeam> for UserTeamDto {
    fn from(row: UserTeam) -> Self {
        Self {
            id: row.id,
            team_id: row.team_id,
            team_member_id: row.team_member_id,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserTeamInput {
    pub team_id: Uuid,
    pub team_member_id: Uuid,
    #[serde(default)]
    pub role: TeamRole,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserTeamListInput {
    pub team_id: Option<Uuid>,
    pub team_member_id: Option<Uuid>,
    pub role: Option<TeamRole>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
