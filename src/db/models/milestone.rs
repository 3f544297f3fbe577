use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Milestone models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Milestone {
    pub id: Uuid,
    pub timeline_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::milestones)]
pub struct NewMilestone {
    pub timeline_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(treat_none_as_null = true)]
pub struct MilestoneChangeset {
    pub timeline_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDto {
    pub id: Uuid,
    pub timeline_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Milestone> for MilestoneDto {
    fn from(milestone: Milestone) -> Self {
        Self {
            id: milestone.id,
            timeline_id: milestone.timeline_id,
            title: milestone.title,
            description: milestone.description,
            due_date: milestone.due_date,
            is_completed: milestone.is_completed,
            created_at: milestone.created_at,
            updated_at: milestone.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneInput {
    pub timeline_id: Uuid,

    #[validate(length(
        min = 1,
        max = 256,
        message = "Milestone title must be between 1 and 256 characters"
    ))]
    pub title: String,

    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneListInput {
    pub timeline_id: Option<Uuid>,
    pub is_completed: Option<bool>,
    pub keyword: Option<String>,
    pub due_from: Option<DateTime<Utc>>,
    pub due_to: Option<DateTime<Utc>>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
