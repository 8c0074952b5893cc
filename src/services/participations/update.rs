use super::get::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::participations::{
    entities::Participation, requests::UpdateParticipationRequest,
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

/// 只允许修改角色、状态与备注，参与者本身不可变
pub async fn update_participation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    req: UpdateParticipationRequest,
) -> Result<Participation> {
    let principal = require(principal, Resource::Participation, Action::Update)?;

    let participation = ctx
        .storage
        .update_participation(id, req)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Participation,
            Some(id),
            Some(serde_json::json!({
                "role": participation.role,
                "status": participation.status,
            })),
        )
        .await;

    Ok(participation)
}
