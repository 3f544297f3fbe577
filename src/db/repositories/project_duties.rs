use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::duty::{
    NewProjectDuty, ProjectDuty, ProjectDutyChangeset, ProjectDutyListInput,
};

pub struct ProjectDutyRepo;

impl ProjectDutyRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_duty: &NewProjectDuty,
    ) -> Result<ProjectDuty, diesel::result::Error> {
        diesel::insert_into(crate::schema::project_duties::table)
            .values(new_duty)
            .returning(ProjectDuty::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        duty_id: uuid::Uuid,
    ) -> Result<Option<ProjectDuty>, diesel::result::Error> {
        use crate::schema::project_duties::dsl::*;
        project_duties
            .filter(id.eq(duty_id))
            .select(ProjectDuty::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(
        conn: &mut PgConnection,
        duty_id: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::project_duties::dsl::*;
        diesel::select(diesel::dsl::exists(project_duties.filter(id.eq(duty_id)))).get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        duty_id: uuid::Uuid,
        changes: &ProjectDutyChangeset,
    ) -> Result<ProjectDuty, diesel::result::Error> {
        use crate::schema::project_duties::dsl::*;
        diesel::update(project_duties.filter(id.eq(duty_id)))
            .set(changes)
            .returning(ProjectDuty::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        duty_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::project_duties::dsl::*;
        diesel::delete(project_duties.filter(id.eq(duty_id))).execute(conn)
    }

    fn filtered(
        filter: &ProjectDutyListInput,
    ) -> crate::schema::project_duties::BoxedQuery<'static, Pg> {
        use crate::schema::project_duties::dsl::*;
        let mut query = project_duties.into_boxed();

        if let Some(project) = filter.project_id {
            query = query.filter(project_id.eq(project));
        }
        if let Some(s) = filter.status {
            query = query.filter(status.eq(s));
        }
        if let Some(p) = filter.priority {
            query = query.filter(priority.eq(p));
        }
        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(title.ilike(pattern.clone()).or(description.ilike(pattern)));
        }
        if let Some(before) = filter.due_before {
            query = query.filter(due_date.lt(before));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &ProjectDutyListInput,
        page: Page,
    ) -> Result<(Vec<ProjectDuty>, i64), diesel::result::Error> {
        use crate::schema::project_duties::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(ProjectDuty::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
