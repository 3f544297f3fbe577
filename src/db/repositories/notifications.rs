use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::notification::{
    NewNotification, Notification, NotificationChangeset, NotificationListInput,
};

pub struct NotificationRepo;

impl NotificationRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_notification: &NewNotification,
    ) -> Result<Notification, diesel::result::Error> {
        diesel::insert_into(crate::schema::notifications::table)
            .values(new_notification)
            .returning(Notification::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        notification_id: uuid::Uuid,
    ) -> Result<Option<Notification>, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        notifications
            .filter(id.eq(notification_id))
            .filter(is_deleted.eq(false))
            .select(Notification::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut PgConnection,
        notification_id: uuid::Uuid,
        changes: &NotificationChangeset,
    ) -> Result<Notification, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(notifications.filter(id.eq(notification_id)))
            .set(changes)
            .returning(Notification::as_returning())
            .get_result(conn)
    }

    pub fn mark_as_read(
        conn: &mut PgConnection,
        notification_id: uuid::Uuid,
    ) -> Result<Notification, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(notifications.filter(id.eq(notification_id)))
            .set((is_read.eq(true), updated_at.eq(chrono::Utc::now())))
            .returning(Notification::as_returning())
            .get_result(conn)
    }

    /// Marks every live unread notification of `recipient` as read and
    /// returns how many rows changed.
    pub fn mark_all_as_read(
        conn: &mut PgConnection,
        recipient: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(
            notifications
                .filter(user_id.eq(recipient))
                .filter(is_read.eq(false))
                .filter(is_deleted.eq(false)),
        )
        .set((is_read.eq(true), updated_at.eq(chrono::Utc::now())))
        .execute(conn)
    }

    pub fn count_unread(
        conn: &mut PgConnection,
        recipient: uuid::Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        notifications
            .filter(user_id.eq(recipient))
            .filter(is_read.eq(false))
            .filter(is_deleted.eq(false))
            .count()
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        notification_id: uuid::Uuid,
        deleter: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        let now = chrono::Utc::now();
        diesel::update(notifications.filter(id.eq(notification_id)).filter(is_deleted.eq(false)))
            .set((
                is_deleted.eq(true),
                deleted_at.eq(Some(now)),
                deleter_user_id.eq(Some(deleter)),
                updated_at.eq(now),
            ))
            .execute(conn)
    }

    fn filtered(
        recipient: uuid::Uuid,
        sender: Option<uuid::Uuid>,
        filter: &NotificationListInput,
    ) -> crate::schema::notifications::BoxedQuery<'static, Pg> {
        use crate::schema::notifications::dsl::*;
        let mut query = notifications
            .filter(user_id.eq(recipient))
            .filter(is_deleted.eq(false))
            .into_boxed();
        if let Some(sent_by) = sender {
            query = query.filter(sender_user_id.eq(sent_by));
        }
        if let Some(read) = filter.is_read {
            query = query.filter(is_read.eq(read));
        }
        if let Some(kind) = filter.notification_type {
            query = query.filter(notification_type.eq(kind));
        }
        query
    }

    /// Notifications addressed to `recipient`, optionally only those sent
    /// by `sender`.
    pub fn list(
        conn: &mut PgConnection,
        recipient: uuid::Uuid,
        sender: Option<uuid::Uuid>,
        filter: &NotificationListInput,
        page: Page,
    ) -> Result<(Vec<Notification>, i64), diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        let total = Self::filtered(recipient, sender, filter)
            .count()
            .get_result::<i64>(conn)?;
        let items = Self::filtered(recipient, sender, filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Notification::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
