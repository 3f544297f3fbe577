use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::{CountResponse, PagedResult},
    db::models::entity_ref::EntityRef,
    db::models::notification::{
        CreateNotificationInput, NewNotification, Notification, NotificationChangeset,
        NotificationDto, NotificationListInput, UpdateNotificationInput,
    },
    db::repositories::entity_refs::EntityRefRepo,
    db::repositories::notifications::NotificationRepo,
    db::repositories::users::UserRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::{require_text, validate_input},
};

pub struct NotificationsService;

impl NotificationsService {
    /// A notification is visible to its recipient and its sender only.
    fn find_visible(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Notification, AppError> {
        let notification =
            NotificationRepo::find_by_id(conn, id)?
                .ok_or_else(|| AppError::not_found("Notification"))?;

        if notification.user_id != ctx.user_id && notification.sender_user_id != Some(ctx.user_id) {
            return Err(AppError::not_found("Notification"));
        }
        Ok(notification)
    }

    pub fn mark_as_read(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<NotificationDto, AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let notification = Self::find_visible(conn, ctx, id)?;
            if notification.user_id != ctx.user_id {
                return Err(AppError::forbidden(
                    "Only the recipient can mark a notification as read",
                ));
            }
            if notification.is_read {
                return Ok(notification.into());
            }
            Ok(NotificationRepo::mark_as_read(conn, id)?.into())
        })
    }

    pub fn mark_all_as_read(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<CountResponse, AppError> {
        let updated = NotificationRepo::mark_all_as_read(conn, ctx.user_id)?;
        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %ctx.user_id,
            updated,
            "Notifications marked as read"
        );
        Ok(CountResponse { count: updated as i64 })
    }

    pub fn get_unread_count(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<CountResponse, AppError> {
        let count = NotificationRepo::count_unread(conn, ctx.user_id)?;
        Ok(CountResponse { count })
    }
}

impl CrudService for NotificationsService {
    const NAME: &'static str = "Notification";

    type Dto = NotificationDto;
    type CreateInput = CreateNotificationInput;
    type UpdateInput = UpdateNotificationInput;
    type ListInput = NotificationListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateNotificationInput,
    ) -> Result<NotificationDto, AppError> {
        validate_input(&input)?;
        require_text(&input.message, "Notification message is required")?;

        let target = EntityRef::new(input.entity_type, input.entity_id);

        conn.transaction::<_, AppError, _>(|conn| {
            if UserRepo::find_by_id(conn, input.user_id)?.is_none() {
                return Err(AppError::not_found("User"));
            }
            if !EntityRefRepo::exists(conn, target)? {
                return Err(AppError::not_found(target.kind.to_string()));
            }

            let notification = NotificationRepo::insert(
                conn,
                &NewNotification {
                    user_id: input.user_id,
                    sender_user_id: Some(ctx.user_id),
                    message: input.message,
                    notification_type: input.notification_type,
                    entity_type: target.kind,
                    entity_id: target.id,
                },
            )?;
            Ok(notification.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateNotificationInput,
    ) -> Result<NotificationDto, AppError> {
        validate_input(&input)?;
        require_text(&input.message, "Notification message is required")?;

        conn.transaction::<_, AppError, _>(|conn| {
            let existing = Self::find_visible(conn, ctx, id)?;
            if existing.is_read != input.is_read && existing.user_id != ctx.user_id {
                return Err(AppError::forbidden(
                    "Only the recipient can change the read state of a notification",
                ));
            }

            let notification = NotificationRepo::update(
                conn,
                id,
                &NotificationChangeset {
                    message: input.message,
                    notification_type: input.notification_type,
                    is_read: input.is_read,
                    updated_at: Utc::now(),
                },
            )?;
            Ok(notification.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::find_visible(conn, ctx, id)?;
            NotificationRepo::soft_delete(conn, id, ctx.user_id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<NotificationDto, AppError> {
        Ok(Self::find_visible(conn, ctx, id)?.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: NotificationListInput,
    ) -> Result<PagedResult<NotificationDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let recipient = input.user_id.unwrap_or(ctx.user_id);
        // Another user's inbox is only visible for what the caller sent.
        let sender = (recipient != ctx.user_id).then_some(ctx.user_id);
        let (items, total) = NotificationRepo::list(conn, recipient, sender, &input, page)?;
        Ok(PagedResult::new(total, items).map(NotificationDto::from))
    }
}
