use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::models::document::{Document, DocumentChangeset, DocumentListInput, NewDocument};

pub struct DocumentRepo;

impl DocumentRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_document: &NewDocument,
    ) -> Result<Document, diesel::result::Error> {
        diesel::insert_into(crate::schema::documents::table)
            .values(new_document)
            .returning(Document::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        document_id: uuid::Uuid,
    ) -> Result<Option<Document>, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        documents
            .filter(id.eq(document_id))
            .select(Document::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut PgConnection,
        document_id: uuid::Uuid,
        changes: &DocumentChangeset,
    ) -> Result<Document, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        diesel::update(documents.filter(id.eq(document_id)))
            .set(changes)
            .returning(Document::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        document_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        diesel::delete(documents.filter(id.eq(document_id))).execute(conn)
    }

    fn filtered(filter: &DocumentListInput) -> crate::schema::documents::BoxedQuery<'static, Pg> {
        use crate::schema::documents::dsl::*;
        let mut query = documents.into_boxed();
        if let Some(duty) = filter.project_duty_id {
            query = query.filter(project_duty_id.eq(duty));
        }
        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(file_name.ilike(pattern));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &DocumentListInput,
        page: Page,
    ) -> Result<(Vec<Document>, i64), diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Document::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
