use crate::db::enums::{DutyPriority, DutyStatus};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Project duty models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::project_duties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectDuty {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: DutyStatus,
    pub priority: DutyPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::project_duties)]
pub struct NewProjectDuty {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: DutyStatus,
    pub priority: DutyPriority,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::project_duties)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectDutyChangeset {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: DutyStatus,
    pub priority: DutyPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDutyDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: DutyStatus,
    pub priority: DutyPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectDuty> for ProjectDutyDto {
    fn from(duty: ProjectDuty) -> Self {
        Self {
            id: duty.id,
            project_id: duty.project_id,
            title: duty.title,
            description: duty.description,
            status: duty.status,
            priority: duty.priority,
            due_date: duty.due_date,
            created_at: duty.created_at,
            updated_at: duty.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDutyInput {
    pub project_id: Uuid,

    #[validate(length(
        min = 1,
        max = 256,
        message = "Duty title must be between 1 and 256 characters"
    ))]
    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub status: DutyStatus,

    #[serde(default)]
    pub priority: DutyPriority,

    pub due_date: Option<DateTime<Utc>>,
}

pub type UpdateProjectDutyInput = CreateProjectDutyInput;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDutyListInput {
    pub project_id: Option<Uuid>,
    pub status: Option<DutyStatus>,
    pub priority: Option<DutyPriority>,
    pub keyword: Option<String>,
    pub due_before: Option<DateTime<Utc>>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
