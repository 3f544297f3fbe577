use diesel::pg::Pg;
use diesel::prelude::*;

use super::Page;
use crate::db::models::comment::{Comment, CommentListInput, NewComment};

pub struct CommentRepo;

impl CommentRepo {
    /// Live comments only; soft-deleted rows are invisible here.
    pub fn find_by_id(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        comments
            .filter(id.eq(comment_id))
            .filter(is_deleted.eq(false))
            .select(Comment::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_comment: &NewComment,
    ) -> Result<Comment, diesel::result::Error> {
        diesel::insert_into(crate::schema::comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(conn)
    }

    pub fn update_content(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
        new_content: &str,
    ) -> Result<Comment, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        diesel::update(comments.filter(id.eq(comment_id)))
            .set((content.eq(new_content), updated_at.eq(chrono::Utc::now())))
            .returning(Comment::as_returning())
            .get_result(conn)
    }

    pub fn soft_delete(
        conn: &mut PgConnection,
        comment_id: uuid::Uuid,
        deleter: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        let now = chrono::Utc::now();
        diesel::update(comments.filter(id.eq(comment_id)).filter(is_deleted.eq(false)))
            .set((
                is_deleted.eq(true),
                deleted_at.eq(Some(now)),
                deleter_user_id.eq(Some(deleter)),
                updated_at.eq(now),
            ))
            .execute(conn)
    }

    fn filtered(filter: &CommentListInput) -> crate::schema::comments::BoxedQuery<'static, Pg> {
        use crate::schema::comments::dsl::*;
        let mut query = comments.filter(is_deleted.eq(false)).into_boxed();
        if let Some(kind) = filter.entity_type {
            query = query.filter(entity_type.eq(kind));
        }
        if let Some(target) = filter.entity_id {
            query = query.filter(entity_id.eq(target));
        }
        if let Some(author) = filter.user_id {
            query = query.filter(user_id.eq(author));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &CommentListInput,
        page: Page,
    ) -> Result<(Vec<Comment>, i64), diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Comment::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
