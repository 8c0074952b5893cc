//! 审计日志查询，仅管理员可用；日志只追加，没有修改与删除接口

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::audit::{
    requests::{AuditLogListParams, AuditLogListQuery},
    responses::AuditLogListResponse,
};
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::{ServiceContext, resolve_context};
use crate::utils::validate::{normalize_date_range, parse_date};

/// 日期当天零点（UTC）的时间戳
fn day_start(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// 把日期区间换算成 `[from_ts, to_ts)` 时间戳区间，结束日期当天包含在内
pub fn timestamp_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<(Option<i64>, Option<i64>)> {
    let (start, end) = normalize_date_range(start_date, end_date)?;
    let from_ts = start
        .as_deref()
        .map(|d| parse_date("start_date", d).map(day_start))
        .transpose()?;
    let to_ts = end
        .as_deref()
        .map(|d| parse_date("end_date", d).map(|d| day_start(d) + 86_400))
        .transpose()?;
    Ok((from_ts, to_ts))
}

pub async fn list_audit_logs(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: AuditLogListParams,
) -> Result<AuditLogListResponse> {
    require(principal, Resource::AuditLog, Action::Read)?;
    let (from_ts, to_ts) =
        timestamp_range(params.start_date.as_deref(), params.end_date.as_deref())?;

    ctx.storage
        .list_audit_logs(AuditLogListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            actor_id: params.actor_id,
            entity: params.entity.filter(|e| !e.trim().is_empty()),
            action: params.action,
            from_ts,
            to_ts,
        })
        .await
}

pub struct AuditLogService {
    context: Option<ServiceContext>,
}

impl AuditLogService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_audit_logs(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: AuditLogListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list_audit_logs(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Audit logs retrieved successfully",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::audit::entities::AuditAction;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, staff_principal};

    fn params() -> AuditLogListParams {
        AuditLogListParams {
            pagination: PaginationQuery::default(),
            actor_id: None,
            entity: None,
            action: None,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_timestamp_range_includes_end_day() {
        let (from, to) = timestamp_range(Some("2025-01-01"), Some("2025-01-01")).unwrap();
        assert_eq!(from, Some(1_735_689_600));
        assert_eq!(to, Some(1_735_689_600 + 86_400));
        assert_eq!(timestamp_range(None, None).unwrap(), (None, None));
        assert!(timestamp_range(Some("2025-02-01"), Some("2025-01-01")).is_err());
    }

    #[tokio::test]
    async fn test_admin_only_and_filters() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;

        ctx.audit
            .record(Some(&manager), AuditAction::Create, Resource::Student, Some(1), None)
            .await;
        ctx.audit
            .record(Some(&admin), AuditAction::Delete, Resource::Teacher, Some(2), None)
            .await;

        assert_eq!(
            list_audit_logs(&ctx, Some(&manager), params())
                .await
                .unwrap_err()
                .code(),
            "E003"
        );

        let all = list_audit_logs(&ctx, Some(&admin), params()).await.unwrap();
        assert_eq!(all.pagination.total, 2);

        let deletes = list_audit_logs(
            &ctx,
            Some(&admin),
            AuditLogListParams {
                action: Some(AuditAction::Delete),
                ..params()
            },
        )
        .await
        .unwrap();
        assert_eq!(deletes.items.len(), 1);
        assert_eq!(deletes.items[0].entity, "teacher");

        let by_actor = list_audit_logs(
            &ctx,
            Some(&admin),
            AuditLogListParams {
                actor_id: Some(manager.id),
                entity: Some("student".to_string()),
                ..params()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_actor.items.len(), 1);
        assert_eq!(by_actor.items[0].actor_role.as_deref(), Some("manager"));
    }
}
