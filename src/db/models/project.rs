use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Project models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub team_id: Uuid,
    pub project_manager_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_collaboration: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject {
    pub team_id: Uuid,
    pub project_manager_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_collaboration: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    pub team_id: Uuid,
    pub project_manager_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_collaboration: bool,
    pub updated_at: DateTime<Utc>,
}

// Project API DTOs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: Uuid,
    pub team_id: Uuid,
    pub project_manager_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_collaboration: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            team_id: project.team_id,
            project_manager_id: project.project_manager_id,
            name: project.name,
            description: project.description,
            start_date: project.start_date,
            end_date: project.end_date,
            is_collaboration: project.is_collaboration,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Project name must be between 1 and 128 characters"
    ))]
    pub name: String,

    pub description: Option<String>,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[serde(default)]
    pub is_collaboration: bool,

    pub team_id: Uuid,

    pub project_manager_id: Uuid,
}

pub type UpdateProjectInput = CreateProjectInput;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListInput {
    pub keyword: Option<String>,
    pub team_id: Option<Uuid>,
    pub project_manager_id: Option<Uuid>,
    pub is_collaboration: Option<bool>,
    pub start_from: Option<DateTime<Utc>>,
    pub end_to: Option<DateTime<Utc>>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
