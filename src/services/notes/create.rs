use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::notes::{
    entities::Note,
    requests::{CreateNoteRequest, NewNote},
};
use crate::models::notifications::entities::RecipientKind;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::services::notifications::notify;
use crate::utils::validate::require_text;

pub async fn create_note(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateNoteRequest,
) -> Result<Note> {
    let principal = require(principal, Resource::Note, Action::Create)?;
    require_text("content", &req.content)?;

    let teacher = ctx
        .storage
        .get_teacher_by_id(req.teacher_id)
        .await?
        .ok_or_else(|| SchoolError::invalid_input("teacher_id: teacher does not exist"))?;

    let note = ctx
        .storage
        .create_note(NewNote {
            teacher_id: teacher.id,
            author_id: principal.id,
            note_type: req.note_type,
            content: req.content.trim().to_string(),
        })
        .await?;

    if let Some(account_id) = teacher.linked_account_id {
        notify(
            ctx.storage(),
            account_id,
            RecipientKind::Staff,
            "note",
            "New note",
            format!("A new {} note was added to your profile", note.note_type),
        )
        .await;
    }

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Note,
            Some(note.id),
            Some(serde_json::json!({
                "teacher_id": teacher.id,
                "note_type": note.note_type,
            })),
        )
        .await;

    Ok(note)
}
