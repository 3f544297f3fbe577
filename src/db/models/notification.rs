use crate::db::enums::{EntityKind, NotificationType};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sender_user_id: Option<Uuid>,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleter_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub sender_user_id: Option<Uuid>,
    pub message: String,
    pub notification_type: NotificationType,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NotificationChangeset {
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sender_user_id: Option<Uuid>,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            sender_user_id: n.sender_user_id,
            message: n.message,
            notification_type: n.notification_type,
            is_read: n.is_read,
            entity_type: n.entity_type,
            entity_id: n.entity_id,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// Input for sending a notification directly. The caller becomes the sender.
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationInput {
    pub user_id: Uuid,

    #[validate(length(
        min = 1,
        max = 1024,
        message = "Message must be between 1 and 1024 characters"
    ))]
    pub message: String,

    #[serde(default = "default_notification_type")]
    pub notification_type: NotificationType,

    pub entity_type: EntityKind,
    pub entity_id: Uuid,
}

fn default_notification_type() -> NotificationType {
    NotificationType::Info
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationInput {
    #[validate(length(
        min = 1,
        max = 1024,
        message = "Message must be between 1 and 1024 characters"
    ))]
    pub message: String,

    pub notification_type: NotificationType,

    #[serde(default)]
    pub is_read: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListInput {
    pub user_id: Option<Uuid>,
    pub is_read: Option<bool>,
    pub notification_type: Option<NotificationType>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
