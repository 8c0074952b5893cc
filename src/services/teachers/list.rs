use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::auth::entities::Principal;
use crate::models::teachers::{
    requests::{TeacherListParams, TeacherListQuery},
    responses::TeacherListResponse,
};
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn list_teachers(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: TeacherListParams,
) -> Result<TeacherListResponse> {
    let principal = require(principal, Resource::Teacher, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Teacher).await?;

    let page = Some(params.pagination.page);
    let size = Some(params.pagination.size);
    let Some(teacher_id) = scope.teacher_filter(None).as_query() else {
        return Ok(TeacherListResponse {
            items: Vec::new(),
            pagination: PaginationInfo::empty(page, size),
        });
    };

    ctx.storage
        .list_teachers(TeacherListQuery {
            page,
            size,
            search: params.search,
            department_id: params.department_id,
            subject_id: params.subject_id,
            status: params.status,
            teacher_id,
            linked: None,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    fn params() -> TeacherListParams {
        TeacherListParams {
            pagination: PaginationQuery::default(),
            search: None,
            department_id: None,
            subject_id: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_teacher_sees_only_own_profile() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let unlinked = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let (own, teacher_principal) = linked_teacher(&storage, "T-1", "own@school.test").await;
        seed_teacher(&storage, "T-2", "Other").await;

        let all = list_teachers(&ctx, Some(&manager), params()).await.unwrap();
        assert_eq!(all.pagination.total, 2);

        // 未关联档案时为空页
        let empty = list_teachers(&ctx, Some(&unlinked), params()).await.unwrap();
        assert_eq!(empty.pagination.total, 0);
        assert_eq!(empty.pagination.total_pages, 0);

        let mine = list_teachers(&ctx, Some(&teacher_principal), params())
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 1);
        assert_eq!(mine.items[0].id, own.id);
    }

    #[tokio::test]
    async fn test_parent_and_anonymous_are_rejected() {
        let (_storage, ctx) = context().await;
        let parent = Principal::new(1, "Mum", Role::Parent);
        assert_eq!(
            list_teachers(&ctx, Some(&parent), params())
                .await
                .unwrap_err()
                .code(),
            "E003"
        );
        assert_eq!(
            list_teachers(&ctx, None, params()).await.unwrap_err().code(),
            "E001"
        );
    }
}
