use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Team models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(treat_none_as_null = true)]
pub struct TeamChangeset {
    pub name: String,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Team API DTOs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamInput {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Team name must be between 1 and 128 characters"
    ))]
    pub name: String,

    #[validate(length(max = 1024, message = "Team description is too long (max 1024 characters)"))]
    pub description: Option<String>,
}

pub type UpdateTeamInput = CreateTeamInput;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamListInput {
    pub keyword: Option<String>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
