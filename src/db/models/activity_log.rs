use crate::db::enums::EntityKind;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::activity_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::activity_logs)]
pub struct NewActivityLog {
    pub user_id: Uuid,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub action: String,
    pub details: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::activity_logs)]
#[diesel(treat_none_as_null = true)]
pub struct ActivityLogChangeset {
    pub action: String,
    pub details: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogDto {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            action: log.action,
            details: log.details,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityLogInput {
    pub entity_type: EntityKind,
    pub entity_id: Uuid,

    #[validate(length(min = 1, max = 64, message = "Action must be between 1 and 64 characters"))]
    pub action: String,

    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityLogInput {
    #[validate(length(min = 1, max = 64, message = "Action must be between 1 and 64 characters"))]
    pub action: String,

    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogListInput {
    pub entity_type: Option<EntityKind>,
    pub entity_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
