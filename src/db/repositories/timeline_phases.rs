use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::timeline::{
    NewTimelinePhase, TimelinePhase, TimelinePhaseChangeset, TimelinePhaseListInput,
};

pub struct TimelinePhaseRepo;

impl TimelinePhaseRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_phase: &NewTimelinePhase,
    ) -> Result<TimelinePhase, diesel::result::Error> {
        diesel::insert_into(crate::schema::timeline_phases::table)
            .values(new_phase)
            .returning(TimelinePhase::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        phase_id: uuid::Uuid,
    ) -> Result<Option<TimelinePhase>, diesel::result::Error> {
        use crate::schema::timeline_phases::dsl::*;
        timeline_phases
            .filter(id.eq(phase_id))
            .select(TimelinePhase::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_by_timeline(
        conn: &mut PgConnection,
        target_timeline_id: uuid::Uuid,
    ) -> Result<Vec<TimelinePhase>, diesel::result::Error> {
        use crate::schema::timeline_phases::dsl::*;
        timeline_phases
            .filter(timeline_id.eq(target_timeline_id))
            .order((start_date.asc(), id.asc()))
            .select(TimelinePhase::as_select())
            .load(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        phase_id: uuid::Uuid,
        changes: &TimelinePhaseChangeset,
    ) -> Result<TimelinePhase, diesel::result::Error> {
        use crate::schema::timeline_phases::dsl::*;
        diesel::update(timeline_phases.filter(id.eq(phase_id)))
            .set(changes)
            .returning(TimelinePhase::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        phase_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::timeline_phases::dsl::*;
        diesel::delete(timeline_phases.filter(id.eq(phase_id))).execute(conn)
    }

    fn filtered(
        filter: &TimelinePhaseListInput,
    ) -> crate::schema::timeline_phases::BoxedQuery<'static, Pg> {
        use crate::schema::timeline_phases::dsl::*;
        let mut query = timeline_phases.into_boxed();
        if let Some(timeline) = filter.timeline_id {
            query = query.filter(timeline_id.eq(timeline));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &TimelinePhaseListInput,
        page: Page,
    ) -> Result<(Vec<TimelinePhase>, i64), diesel::result::Error> {
        use crate::schema::timeline_phases::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(TimelinePhase::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
