use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::PagedResult,
    db::models::comment::{
        Comment, CommentDto, CommentListInput, CreateCommentInput, NewComment, UpdateCommentInput,
    },
    db::models::entity_ref::EntityRef,
    db::repositories::comments::CommentRepo,
    db::repositories::entity_refs::EntityRefRepo,
    error::AppError,
    services::CrudService,
    services::audit::{self, ACTION_COMMENTED},
    services::context::RequestContext,
    validation::comment::validate_comment_content,
    validation::validate_input,
};

pub struct CommentsService;

impl CommentsService {
    /// Loads a live comment and checks that the caller wrote it.
    fn find_own(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
        verb: &str,
    ) -> Result<Comment, AppError> {
        let comment = CommentRepo::find_by_id(conn, comment_id)?
            .ok_or_else(|| AppError::not_found("Comment"))?;

        if comment.user_id != ctx.user_id {
            return Err(AppError::forbidden(format!("You can only {} your own comments", verb)));
        }
        Ok(comment)
    }
}

impl CrudService for CommentsService {
    const NAME: &'static str = "Comment";

    type Dto = CommentDto;
    type CreateInput = CreateCommentInput;
    type UpdateInput = UpdateCommentInput;
    type ListInput = CommentListInput;

    fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CreateCommentInput,
    ) -> Result<CommentDto, AppError> {
        validate_input(&input)?;
        validate_comment_content(&input.content)?;

        let target = EntityRef::new(input.entity_type, input.entity_id);

        conn.transaction::<_, AppError, _>(|conn| {
            if !EntityRefRepo::exists(conn, target)? {
                return Err(AppError::not_found(target.kind.to_string()));
            }

            let comment = CommentRepo::insert(
                conn,
                &NewComment {
                    user_id: ctx.user_id,
                    entity_type: target.kind,
                    entity_id: target.id,
                    content: input.content,
                },
            )?;

            audit::record_activity(
                conn,
                ctx,
                target,
                ACTION_COMMENTED,
                Some(format!("Comment {}", comment.id)),
            )?;
            Ok(comment.into())
        })
    }

    fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateCommentInput,
    ) -> Result<CommentDto, AppError> {
        validate_input(&input)?;
        validate_comment_content(&input.content)?;

        conn.transaction::<_, AppError, _>(|conn| {
            Self::find_own(conn, ctx, id, "edit")?;
            let comment = CommentRepo::update_content(conn, id, &input.content)?;
            Ok(comment.into())
        })
    }

    fn delete(conn: &mut PgConnection, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::find_own(conn, ctx, id, "delete")?;
            CommentRepo::soft_delete(conn, id, ctx.user_id)?;
            Ok(())
        })
    }

    fn get(
        conn: &mut PgConnection,
        _ctx: &RequestContext,
        id: Uuid,
    ) -> Result<CommentDto, AppError> {
        let comment = CommentRepo::find_by_id(conn, id)?
            .ok_or_else(|| AppError::not_found("Comment"))?;
        Ok(comment.into())
    }

    fn get_list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        input: CommentListInput,
    ) -> Result<PagedResult<CommentDto>, AppError> {
        let page = ctx.settings.page(input.skip_count, input.max_result_count)?;
        let (items, total) = CommentRepo::list(conn, &input, page)?;
        Ok(PagedResult::new(total, items).map(CommentDto::from))
    }
}
