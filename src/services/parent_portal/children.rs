use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::parents::responses::ChildrenResponse;
use crate::policy::{Action, DataScope, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn list_children(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<ChildrenResponse> {
    let principal = require(principal, Resource::ParentPortal, Action::Read)?;
    let items = match scope_for(ctx.storage(), principal, Resource::ParentPortal).await? {
        DataScope::Parent(parent_id) => ctx.storage.list_students_by_parent(parent_id).await?,
        _ => Vec::new(),
    };
    Ok(ChildrenResponse { items })
}
