use super::milestone::MilestoneDto;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Timeline models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::timelines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Timeline {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::timelines)]
pub struct NewTimeline {
    pub project_id: Uuid,
    pub name: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::timelines)]
pub struct TimelineChangeset {
    pub project_id: Uuid,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Timeline> for TimelineDto {
    fn from(timeline: Timeline) -> Self {
        Self {
            id: timeline.id,
            project_id: timeline.project_id,
            name: timeline.name,
            created_at: timeline.created_at,
            updated_at: timeline.updated_at,
        }
    }
}

/// A timeline together with its phases and milestones, ordered by date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDetailDto {
    #[serde(flatten)]
    pub timeline: TimelineDto,
    pub phases: Vec<TimelinePhaseDto>,
    pub milestones: Vec<MilestoneDto>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInput {
    pub project_id: Uuid,

    #[validate(length(
        min = 1,
        max = 128,
        message = "Timeline name must be between 1 and 128 characters"
    ))]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimelineListInput {
    pub project_id: Option<Uuid>,
    pub keyword: Option<String>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdQuery {
    pub project_id: Uuid,
}

// Timeline phase models
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::timeline_phases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimelinePhase {
    pub id: Uuid,
    pub timeline_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::timeline_phases)]
pub struct NewTimelinePhase {
    pub timeline_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::timeline_phases)]
pub struct TimelinePhaseChangeset {
    pub timeline_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhaseDto {
    pub id: Uuid,
    pub timeline_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimelinePhase> for TimelinePhaseDto {
    fn from(phase: TimelinePhase) -> Self {
        Self {
            id: phase.id,
            timeline_id: phase.timeline_id,
            name: phase.name,
            start_date: phase.start_date,
            end_date: phase.end_date,
            created_at: phase.created_at,
            updated_at: phase.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhaseInput {
    pub timeline_id: Uuid,

    #[validate(length(
        min = 1,
        max = 128,
        message = "Phase name must be between 1 and 128 characters"
    ))]
    pub name: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhaseListInput {
    pub timeline_id: Option<Uuid>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
