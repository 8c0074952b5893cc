use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::students::{
    requests::{StudentListParams, StudentListQuery},
    responses::StudentListResponse,
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn list_students(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: StudentListParams,
) -> Result<StudentListResponse> {
    require(principal, Resource::Student, Action::Read)?;
    ctx.storage
        .list_students(StudentListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            grade: params.grade,
            parent_id: params.parent_id,
            search: params.search,
        })
        .await
}
