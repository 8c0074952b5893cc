use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::participations::{
    requests::{ParticipationListParams, ParticipationListQuery},
    responses::ParticipationListResponse,
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn list_participations(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: ParticipationListParams,
) -> Result<ParticipationListResponse> {
    require(principal, Resource::Participation, Action::Read)?;
    ctx.storage
        .list_participations(ParticipationListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            activity_id: params.activity_id,
            student_id: params.student_id,
            teacher_id: params.teacher_id,
        })
        .await
}
