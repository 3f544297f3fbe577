use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::activity_log::{
    ActivityLog, ActivityLogChangeset, ActivityLogListInput, NewActivityLog,
};

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    pub fn insert(
        conn: &mut PgConnection,
        entry: &NewActivityLog,
    ) -> Result<ActivityLog, diesel::result::Error> {
        diesel::insert_into(crate::schema::activity_logs::table)
            .values(entry)
            .returning(ActivityLog::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        log_id: uuid::Uuid,
    ) -> Result<Option<ActivityLog>, diesel::result::Error> {
        use crate::schema::activity_logs::dsl::*;
        activity_logs
            .filter(id.eq(log_id))
            .select(ActivityLog::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut PgConnection,
        log_id: uuid::Uuid,
        changes: &ActivityLogChangeset,
    ) -> Result<ActivityLog, diesel::result::Error> {
        use crate::schema::activity_logs::dsl::*;
        diesel::update(activity_logs.filter(id.eq(log_id)))
            .set(changes)
            .returning(ActivityLog::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        log_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::activity_logs::dsl::*;
        diesel::delete(activity_logs.filter(id.eq(log_id))).execute(conn)
    }

    fn filtered(
        filter: &ActivityLogListInput,
    ) -> crate::schema::activity_logs::BoxedQuery<'static, Pg> {
        use crate::schema::activity_logs::dsl::*;
        let mut query = activity_logs.into_boxed();
        if let Some(kind) = filter.entity_type {
            query = query.filter(entity_type.eq(kind));
        }
        if let Some(target) = filter.entity_id {
            query = query.filter(entity_id.eq(target));
        }
        if let Some(actor) = filter.user_id {
            query = query.filter(user_id.eq(actor));
        }
        if let Some(from) = filter.from {
            query = query.filter(created_at.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(created_at.le(to));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &ActivityLogListInput,
        page: Page,
    ) -> Result<(Vec<ActivityLog>, i64), diesel::result::Error> {
        use crate::schema::activity_logs::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(ActivityLog::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
