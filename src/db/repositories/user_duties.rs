use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::assignment::{NewUserDuty, UserDuty, UserDutyListInput};

pub struct UserDutyRepo;

impl UserDutyRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_row: &NewUserDuty,
    ) -> Result<UserDuty, diesel::result::Error> {
        diesel::insert_into(crate::schema::user_duties::table)
            .values(new_row)
            .returning(UserDuty::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
    ) -> Result<Option<UserDuty>, diesel::result::Error> {
        use crate::schema::user_duties::dsl::*;
        user_duties
            .filter(id.eq(row_id))
            .select(UserDuty::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
        changes: &NewUserDuty,
    ) -> Result<UserDuty, diesel::result::Error> {
        use crate::schema::user_duties::dsl::*;
        diesel::update(user_duties.filter(id.eq(row_id)))
            .set(changes)
            .returning(UserDuty::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::user_duties::dsl::*;
        diesel::delete(user_duties.filter(id.eq(row_id))).execute(conn)
    }

    fn filtered(filter: &UserDutyListInput) -> crate::schema::user_duties::BoxedQuery<'static, Pg> {
        use crate::schema::user_duties::dsl::*;
        let mut query = user_duties.into_boxed();
        if let Some(duty) = filter.project_duty_id {
            query = query.filter(project_duty_id.eq(duty));
        }
        if let Some(member) = filter.team_member_id {
            query = query.filter(team_member_id.eq(member));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &UserDutyListInput,
        page: Page,
    ) -> Result<(Vec<UserDuty>, i64), diesel::result::Error> {
        use crate::schema::user_duties::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(UserDuty::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
