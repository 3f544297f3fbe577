use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::assignment::{NewUserTeam, UserTeam, UserTeamChangeset, UserTeamListInput};

pub struct UserTeamRepo;

impl UserTeamRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_row: &NewUserTeam,
    ) -> Result<UserTeam, diesel::result::Error> {
        diesel::insert_into(crate::schema::user_teams::table)
            .values(new_row)
            .returning(UserTeam::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
    ) -> Result<Option<UserTeam>, diesel::result::Error> {
        use crate::schema::user_teams::dsl::*;
        user_teams
            .filter(id.eq(row_id))
            .select(UserTeam::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
        changes: &UserTeamChangeset,
    ) -> Result<UserTeam, diesel::result::Error> {
        use crate::schema::user_teams::dsl::*;
        diesel::update(user_teams.filter(id.eq(row_id)))
            .set(changes)
            .returning(UserTeam::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        row_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::user_teams::dsl::*;
        diesel::delete(user_teams.filter(id.eq(row_id))).execute(conn)
    }

    fn filtered(filter: &UserTeamListInput) -> crate::schema::user_teams::BoxedQuery<'static, Pg> {
        use crate::schema::user_teams::dsl::*;
        let mut query = user_teams.into_boxed();
        if let Some(team) = filter.team_id {
            query = query.filter(team_id.eq(team));
        }
        if let Some(member) = filter.team_member_id {
            query = query.filter(team_member_id.eq(member));
        }
        if let Some(r) = filter.role {
            query = query.filter(role.eq(r));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &UserTeamListInput,
        page: Page,
    ) -> Result<(Vec<UserTeam>, i64), diesel::result::Error> {
        use crate::schema::user_teams::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(UserTeam::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
