use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::auth::entities::Principal;
use crate::models::notes::{
    requests::{NoteListParams, NoteListQuery},
    responses::NoteListResponse,
};
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn list_notes(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: NoteListParams,
) -> Result<NoteListResponse> {
    let principal = require(principal, Resource::Note, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Note).await?;

    let page = Some(params.pagination.page);
    let size = Some(params.pagination.size);
    let Some(teacher_id) = scope.teacher_filter(params.teacher_id).as_query() else {
        return Ok(NoteListResponse {
            items: Vec::new(),
            pagination: PaginationInfo::empty(page, size),
        });
    };

    ctx.storage
        .list_notes(NoteListQuery {
            page,
            size,
            teacher_id,
            note_type: params.note_type,
        })
        .await
}
