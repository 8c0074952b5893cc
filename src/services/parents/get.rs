use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::parents::responses::ParentDetailResponse;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

/// 家长详情，附带其子女
pub async fn get_parent(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<ParentDetailResponse> {
    require(principal, Resource::Parent, Action::Read)?;
    let parent = ctx
        .storage
        .get_parent_account_by_id(id)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))?;
    let children = ctx.storage.list_students_by_parent(parent.id).await?;
    Ok(ParentDetailResponse { parent, children })
}
