use super::get::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn delete_participation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<()> {
    let principal = require(principal, Resource::Participation, Action::Delete)?;

    if !ctx.storage.delete_participation(id).await? {
        return Err(SchoolError::not_found(NOT_FOUND));
    }

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Delete,
            Resource::Participation,
            Some(id),
            None,
        )
        .await;
    Ok(())
}
