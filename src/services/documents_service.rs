use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::PagedResult,
    db::models::document::{
        DocumentChangeset, DocumentDto, DocumentInput, DocumentListInput, NewDocument,
    },
    db::repositories::documents::DocumentRepo,
    db::repositories::project_duties::ProjectDutyRepo,
    error::AppError,
    services::CrudService,
    services::context::RequestContext,
    validation::project::validate_document_input,
};

pub struct DocumentsService;

impl CrudService for DocumentsService {
    const NAME: &'static str = "Document";

    type Dto = DocumentDto;
    type CreateInput = DocumentInput;
    type UpdateInput = DocumentInput;
    type ListInput = DocumentListInput;

    fn create(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        input: DocumentInput,
    ) -> Result<DocumentDto, AppError> {
        validate_document_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            if !ProjectDutyRepo::exists(conn, input.project_duty_id)? {
                return Err(AppError::not_found("Project duty"));
            }

            let document = DocumentRepo::insert(
                conn,
                &NewDocument {
                    project_duty_id: input.project_duty_id,
                    file_name: input.file_name.trim().to_string(),
                    file_url: input.file_url,
                },
            )?;
            Ok(document.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
        input: DocumentInput,
    ) -> Result<DocumentDto, AppError> {
        validate_document_input(&input)?;

        conn.transaction::<_, AppError, _>(|conn| {
            DocumentRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Document"))?;
            if !ProjectDutyRepo::exists(conn, input.project_duty_id)? {
                return Err(AppError::not_found("Project duty"));
            }

            let document = DocumentRepo::update(
                conn,
                id,
                &DocumentChangeset {
                    project_duty_id: input.project_duty_id,
                    file_name: input.file_name.trim().to_string(),
                    file_url: input.file_url,
                    updated_at: Utc::now(),
                },
            )?;
            Ok(document.into())
        })
    }

    fn delete(conn: &mut PgConnection, _ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            DocumentRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Document"))?;
            DocumentRepo::delete_by_id(conn, id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<DocumentDto, AppError> {
        let document = DocumentRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Document"))?;
        Ok(document.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: DocumentListInput,
    ) -> Result<PagedResult<DocumentDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = DocumentRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(DocumentDto::from))
    }
}
