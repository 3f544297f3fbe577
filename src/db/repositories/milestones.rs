use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::milestone::{Milestone, MilestoneChangeset, MilestoneListInput, NewMilestone};

pub struct MilestoneRepo;

impl MilestoneRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_milestone: &NewMilestone,
    ) -> Result<Milestone, diesel::result::Error> {
        diesel::insert_into(crate::schema::milestones::table)
            .values(new_milestone)
            .returning(Milestone::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        milestone_id: uuid::Uuid,
    ) -> Result<Option<Milestone>, diesel::result::Error> {
        use crate::schema::milestones::dsl::*;
        milestones
            .filter(id.eq(milestone_id))
            .select(Milestone::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_timeline(
        conn: &mut PgConnection,
        target_timeline_id: uuid::Uuid,
    ) -> Result<Vec<Milestone>, diesel::result::Error> {
        use crate::schema::milestones::dsl::*;
        milestones
            .filter(timeline_id.eq(target_timeline_id))
            .order((due_date.asc(), id.asc()))
            .select(Milestone::as_select())
            .load(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        milestone_id: uuid::Uuid,
        changes: &MilestoneChangeset,
    ) -> Result<Milestone, diesel::result::Error> {
        use crate::schema::milestones::dsl::*;
        diesel::update(milestones.filter(id.eq(milestone_id)))
            .set(changes)
            .returning(Milestone::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        milestone_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::milestones::dsl::*;
        diesel::delete(milestones.filter(id.eq(milestone_id))).execute(conn)
    }

    fn filtered(filter: &MilestoneListInput) -> crate::schema::milestones::BoxedQuery<'static, Pg> {
        use crate::schema::milestones::dsl::*;
        let mut query = milestones.into_boxed();

        if let Some(timeline) = filter.timeline_id {
            query = query.filter(timeline_id.eq(timeline));
        }
        if let Some(done) = filter.is_completed {
            query = query.filter(is_completed.eq(done));
        }
        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(title.ilike(pattern.clone()).or(description.ilike(pattern)));
        }
        if let Some(from) = filter.due_from {
            query = query.filter(due_date.ge(from));
        }
        if let Some(to) = filter.due_to {
            query = query.filter(due_date.le(to));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &MilestoneListInput,
        page: Page,
    ) -> Result<(Vec<Milestone>, i64), diesel::result::Error> {
        use crate::schema::milestones::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Milestone::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
