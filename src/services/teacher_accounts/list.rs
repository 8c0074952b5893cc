use crate::errors::Result;
use crate::models::accounts::{
    requests::TeacherAccountListParams, responses::TeacherAccountListResponse,
};
use crate::models::auth::entities::Principal;
use crate::models::teachers::requests::TeacherListQuery;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn list_teacher_accounts(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: TeacherAccountListParams,
) -> Result<TeacherAccountListResponse> {
    require(principal, Resource::TeacherAccount, Action::Read)?;

    ctx.storage
        .list_teacher_accounts(TeacherListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            linked: params.linked,
            ..Default::default()
        })
        .await
}
