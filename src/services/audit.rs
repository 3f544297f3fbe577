use diesel::PgConnection;
use uuid::Uuid;

use crate::db::enums::NotificationType;
use crate::db::models::activity_log::NewActivityLog;
use crate::db::models::entity_ref::EntityRef;
use crate::db::models::notification::NewNotification;
use crate::db::repositories::activity_logs::ActivityLogRepo;
use crate::db::repositories::notifications::NotificationRepo;
use crate::error::AppError;
use crate::services::context::RequestContext;

pub const ACTION_CREATED: &str = "Created";
pub const ACTION_UPDATED: &str = "Updated";
pub const ACTION_DELETED: &str = "Deleted";
pub const ACTION_COMMENTED: &str = "Commented";

/// Appends an activity log entry attributed to the caller. Runs on the
/// caller's connection so it shares the surrounding transaction.
pub fn record_activity(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    target: EntityRef,
    action: &str,
    details: Option<String>,
) -> Result<(), AppError> {
    ActivityLogRepo::insert(
        conn,
        &NewActivityLog {
            user_id: ctx.user_id,
            entity_type: target.kind,
            entity_id: target.id,
            action: action.to_string(),
            details,
        },
    )?;

    tracing::debug!(
        request_id = %ctx.request_id,
        user_id = %ctx.user_id,
        target = %target,
        action = action,
        "Activity recorded"
    );
    Ok(())
}

/// Sends a notification from the caller to `recipient`.
pub fn notify(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    recipient: Uuid,
    kind: NotificationType,
    message: String,
    target: EntityRef,
) -> Result<(), AppError> {
    NotificationRepo::insert(
        conn,
        &NewNotification {
            user_id: recipient,
            sender_user_id: Some(ctx.user_id),
            message,
            notification_type: kind,
            entity_type: target.kind,
            entity_id: target.id,
        },
    )?;

    tracing::debug!(
        request_id = %ctx.request_id,
        recipient = %recipient,
        kind = %kind,
        target = %target,
        "Notification queued"
    );
    Ok(())
}
