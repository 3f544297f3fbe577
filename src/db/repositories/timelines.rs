use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::timeline::{NewTimeline, Timeline, TimelineChangeset, TimelineListInput};

pub struct TimelineRepo;

impl TimelineRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_timeline: &NewTimeline,
    ) -> Result<Timeline, diesel::result::Error> {
        diesel::insert_into(crate::schema::timelines::table)
            .values(new_timeline)
            .returning(Timeline::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        timeline_id: uuid::Uuid,
    ) -> Result<Option<Timeline>, diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        timelines
            .filter(id.eq(timeline_id))
            .select(Timeline::as_select())
            .first(conn)
            .optional()
    }

    /// A project owns at most one timeline.
    pub fn find_by_project(
        conn: &mut PgConnection,
        target_project_id: uuid::Uuid,
    ) -> Result<Option<Timeline>, diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        timelines
            .filter(project_id.eq(target_project_id))
            .select(Timeline::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(
        conn: &mut PgConnection,
        timeline_id: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        diesel::select(diesel::dsl::exists(timelines.filter(id.eq(timeline_id)))).get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        timeline_id: uuid::Uuid,
        changes: &TimelineChangeset,
    ) -> Result<Timeline, diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        diesel::update(timelines.filter(id.eq(timeline_id)))
            .set(changes)
            .returning(Timeline::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        timeline_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        diesel::delete(timelines.filter(id.eq(timeline_id))).execute(conn)
    }

    fn filtered(filter: &TimelineListInput) -> crate::schema::timelines::BoxedQuery<'static, Pg> {
        use crate::schema::timelines::dsl::*;
        let mut query = timelines.into_boxed();
        if let Some(project) = filter.project_id {
            query = query.filter(project_id.eq(project));
        }
        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(name.ilike(pattern));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &TimelineListInput,
        page: Page,
    ) -> Result<(Vec<Timeline>, i64), diesel::result::Error> {
        use crate::schema::timelines::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Timeline::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
