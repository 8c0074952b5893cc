use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::parents::{
    requests::{ParentListParams, ParentListQuery},
    responses::ParentListResponse,
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn list_parents(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: ParentListParams,
) -> Result<ParentListResponse> {
    require(principal, Resource::Parent, Action::Read)?;
    ctx.storage
        .list_parent_accounts(ParentListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        })
        .await
}
