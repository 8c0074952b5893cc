use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::auth::entities::Principal;
use crate::models::evaluations::{
    requests::{EvaluationListParams, EvaluationListQuery},
    responses::EvaluationListResponse,
};
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;
use crate::utils::validate::normalize_date_range;

pub async fn list_evaluations(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: EvaluationListParams,
) -> Result<EvaluationListResponse> {
    let principal = require(principal, Resource::Evaluation, Action::Read)?;
    let (start_date, end_date) =
        normalize_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let scope = scope_for(ctx.storage(), principal, Resource::Evaluation).await?;

    let page = Some(params.pagination.page);
    let size = Some(params.pagination.size);
    let Some(teacher_id) = scope.teacher_filter(params.teacher_id).as_query() else {
        return Ok(EvaluationListResponse {
            items: Vec::new(),
            pagination: PaginationInfo::empty(page, size),
        });
    };

    ctx.storage
        .list_evaluations(EvaluationListQuery {
            page,
            size,
            teacher_id,
            start_date,
            end_date,
        })
        .await
}
