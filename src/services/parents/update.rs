use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::accounts::entities::ParentAccount;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::parents::requests::{ParentAccountUpdate, UpdateParentRequest};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, require_text, validate_password};

pub async fn update_parent(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    req: UpdateParentRequest,
) -> Result<ParentAccount> {
    let principal = require(principal, Resource::Parent, Action::Update)?;

    if let Some(name) = &req.display_name {
        require_text("display_name", name)?;
    }
    let password_hash = match req.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };
    let password_changed = password_hash.is_some();

    let parent = ctx
        .storage
        .update_parent_account(
            id,
            ParentAccountUpdate {
                email: req.email.as_deref().map(normalize_email).transpose()?,
                password_hash,
                display_name: req.display_name.map(|n| n.trim().to_string()),
                phone: req.phone,
                active: req.active,
            },
        )
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Parent,
            Some(id),
            Some(serde_json::json!({
                "active": parent.active,
                "password_changed": password_changed,
            })),
        )
        .await;

    Ok(parent)
}
