use crate::errors::Result;
use crate::models::PaginationInfo;
use crate::models::attendance::{
    requests::{AttendanceListParams, AttendanceListQuery},
    responses::AttendanceListResponse,
};
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;
use crate::utils::validate::normalize_date_range;

/// 考勤列表；教师角色只能看到关联档案的记录，请求中的 teacher_id 被忽略
pub async fn list_attendance(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: AttendanceListParams,
) -> Result<AttendanceListResponse> {
    let principal = require(principal, Resource::Attendance, Action::Read)?;
    let (start_date, end_date) =
        normalize_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let scope = scope_for(ctx.storage(), principal, Resource::Attendance).await?;

    let page = Some(params.pagination.page);
    let size = Some(params.pagination.size);
    let Some(teacher_id) = scope.teacher_filter(params.teacher_id).as_query() else {
        return Ok(AttendanceListResponse {
            items: Vec::new(),
            pagination: PaginationInfo::empty(page, size),
        });
    };

    ctx.storage
        .list_attendance(AttendanceListQuery {
            page,
            size,
            teacher_id,
            status: params.status,
            start_date,
            end_date,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::attendance::{entities::AttendanceStatus, requests::NewAttendance};
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::seed_teacher;
    use proptest::prelude::*;

    fn params(teacher_id: Option<i64>, status: Option<AttendanceStatus>) -> AttendanceListParams {
        AttendanceListParams {
            pagination: PaginationQuery { page: 1, size: 100 },
            teacher_id,
            status,
            start_date: None,
            end_date: None,
        }
    }

    async fn record(storage: &dyn Storage, teacher_id: i64, date: &str, status: AttendanceStatus) {
        storage
            .create_attendance(NewAttendance {
                teacher_id,
                date: date.to_string(),
                check_in: None,
                check_out: None,
                status,
                notes: None,
            })
            .await
            .unwrap();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn teacher_listing_matches_own_records(
            own_days in 0usize..5,
            other_days in 0usize..5,
            requested_other in any::<bool>(),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            rt.block_on(async {
                let (storage, ctx) = context().await;
                let (own, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;
                let other = seed_teacher(&storage, "T-2", "Other").await;
                for day in 0..own_days {
                    record(storage.as_ref(), own.id, &format!("2025-01-{:02}", day + 1), AttendanceStatus::Present).await;
                }
                for day in 0..other_days {
                    record(storage.as_ref(), other.id, &format!("2025-01-{:02}", day + 1), AttendanceStatus::Late).await;
                }

                let requested = requested_other.then_some(other.id);
                let page = list_attendance(&ctx, Some(&principal), params(requested, None)).await.unwrap();
                assert_eq!(page.pagination.total, own_days as i64);
                assert!(page.items.iter().all(|r| r.teacher_id == own.id));
            });
        }
    }

    #[tokio::test]
    async fn test_unlinked_teacher_gets_empty_page() {
        let (storage, ctx) = context().await;
        let other = seed_teacher(&storage, "T-2", "Other").await;
        record(storage.as_ref(), other.id, "2025-01-01", AttendanceStatus::Present).await;
        let unlinked = staff_principal(&storage, "new@school.test", Role::Teacher).await;

        let page = list_attendance(&ctx, Some(&unlinked), params(Some(other.id), None))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_manager_filters() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let a = seed_teacher(&storage, "T-1", "A").await;
        let b = seed_teacher(&storage, "T-2", "B").await;
        record(storage.as_ref(), a.id, "2025-01-01", AttendanceStatus::Present).await;
        record(storage.as_ref(), a.id, "2025-01-02", AttendanceStatus::Absent).await;
        record(storage.as_ref(), b.id, "2025-01-01", AttendanceStatus::Absent).await;

        let all = list_attendance(&ctx, Some(&manager), params(None, None))
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);

        let absent_a = list_attendance(
            &ctx,
            Some(&manager),
            params(Some(a.id), Some(AttendanceStatus::Absent)),
        )
        .await
        .unwrap();
        assert_eq!(absent_a.items.len(), 1);
        assert_eq!(absent_a.items[0].date, "2025-01-02");
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let mut p = params(None, None);
        p.start_date = Some("2025-02-01".to_string());
        p.end_date = Some("2025-01-01".to_string());
        assert_eq!(
            list_attendance(&ctx, Some(&manager), p)
                .await
                .unwrap_err()
                .code(),
            "E005"
        );
    }
}
