use crate::errors::Result;
use crate::models::activities::{
    requests::{ActivityListParams, ActivityListQuery},
    responses::ActivityListResponse,
};
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::normalize_date_range;

pub async fn list_activities(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: ActivityListParams,
) -> Result<ActivityListResponse> {
    require(principal, Resource::Activity, Action::Read)?;
    let (start_date, end_date) =
        normalize_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;

    ctx.storage
        .list_activities(ActivityListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            category_id: params.category_id,
            status: params.status,
            search: params.search,
            start_date,
            end_date,
        })
        .await
}
