use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::team::{NewTeam, Team, TeamChangeset, TeamListInput};

pub struct TeamRepo;

impl TeamRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_team: &NewTeam,
    ) -> Result<Team, diesel::result::Error> {
        diesel::insert_into(crate::schema::teams::table)
            .values(new_team)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<Option<Team>, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        teams
            .filter(id.eq(team_id))
            .select(Team::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::select(diesel::dsl::exists(teams.filter(id.eq(team_id)))).get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
        changes: &TeamChangeset,
    ) -> Result<Team, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::update(teams.filter(id.eq(team_id)))
            .set(changes)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        team_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        diesel::delete(teams.filter(id.eq(team_id))).execute(conn)
    }

    fn filtered(filter: &TeamListInput) -> crate::schema::teams::BoxedQuery<'static, Pg> {
        use crate::schema::teams::dsl::*;
        let mut query = teams.into_boxed();
        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(name.ilike(pattern));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &TeamListInput,
        page: Page,
    ) -> Result<(Vec<Team>, i64), diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Team::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
