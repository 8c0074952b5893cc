use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::notes::entities::Note;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn get_note(ctx: &ServiceContext, principal: Option<&Principal>, id: i64) -> Result<Note> {
    let principal = require(principal, Resource::Note, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Note).await?;

    match ctx.storage.get_note_by_id(id).await? {
        Some(note) if scope.permits_teacher(note.teacher_id) => Ok(note),
        _ => Err(SchoolError::not_found("Note not found")),
    }
}
