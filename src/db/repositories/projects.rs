use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::project::{NewProject, Project, ProjectChangeset, ProjectListInput};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewProject,
    ) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::select(diesel::dsl::exists(projects.filter(id.eq(project_id)))).get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        changes: &ProjectChangeset,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(changes)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::delete(projects.filter(id.eq(project_id))).execute(conn)
    }

    fn filtered(filter: &ProjectListInput) -> crate::schema::projects::BoxedQuery<'static, Pg> {
        use crate::schema::projects::dsl::*;
        let mut query = projects.into_boxed();

        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(name.ilike(pattern.clone()).or(description.ilike(pattern)));
        }
        if let Some(team) = filter.team_id {
            query = query.filter(team_id.eq(team));
        }
        if let Some(manager) = filter.project_manager_id {
            query = query.filter(project_manager_id.eq(manager));
        }
        if let Some(collab) = filter.is_collaboration {
            query = query.filter(is_collaboration.eq(collab));
        }
        if let Some(from) = filter.start_from {
            query = query.filter(start_date.ge(from));
        }
        if let Some(to) = filter.end_to {
            query = query.filter(end_date.le(to));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &ProjectListInput,
        page: Page,
    ) -> Result<(Vec<Project>, i64), diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Project::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
