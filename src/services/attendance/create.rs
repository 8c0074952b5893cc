use tracing::info;

use crate::errors::{Result, SchoolError};
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{CreateAttendanceRequest, NewAttendance},
};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, is_management, require};
use crate::services::ServiceContext;
use crate::utils::validate::{normalize_date, normalize_time};

/// 当天日期，由服务端决定
fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// 登记考勤
///
/// - `self_register`：为主体关联的教师档案登记当天考勤，重复提交覆盖同一行
/// - 否则：仅管理层可用，任意教师任意日期，同一天重复时返回 Conflict
pub async fn create_attendance(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateAttendanceRequest,
) -> Result<AttendanceRecord> {
    let principal = require(principal, Resource::Attendance, Action::Create)?;

    let check_in = normalize_time("check_in", req.check_in.as_deref())?;
    let check_out = normalize_time("check_out", req.check_out.as_deref())?;

    let record = if req.self_register {
        let profile = ctx
            .storage
            .get_teacher_by_linked_account(principal.id)
            .await?
            .ok_or_else(|| SchoolError::not_found("Teacher profile not found"))?;

        ctx.storage
            .upsert_attendance(NewAttendance {
                teacher_id: profile.id,
                date: today(),
                check_in,
                check_out,
                status: req.status,
                notes: req.notes,
            })
            .await?
    } else {
        if !is_management(principal) {
            return Err(SchoolError::forbidden(
                "Teachers may only register their own attendance",
            ));
        }
        let teacher_id = req
            .teacher_id
            .ok_or_else(|| SchoolError::invalid_input("teacher_id is required"))?;
        if ctx.storage.get_teacher_by_id(teacher_id).await?.is_none() {
            return Err(SchoolError::invalid_input(
                "teacher_id: teacher does not exist",
            ));
        }
        let date = normalize_date("date", req.date.as_deref())?.unwrap_or_else(today);

        ctx.storage
            .create_attendance(NewAttendance {
                teacher_id,
                date,
                check_in,
                check_out,
                status: req.status,
                notes: req.notes,
            })
            .await?
    };

    info!(
        "教师 {} 的考勤已登记: {} {}",
        record.teacher_id, record.date, record.status
    );
    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Attendance,
            Some(record.id),
            Some(serde_json::json!({
                "teacher_id": record.teacher_id,
                "date": record.date,
                "self_register": req.self_register,
            })),
        )
        .await;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{entities::AttendanceStatus, requests::AttendanceListQuery};
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    fn self_register(status: AttendanceStatus, check_in: &str) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            teacher_id: None,
            date: Some("1999-01-01".to_string()),
            check_in: Some(check_in.to_string()),
            check_out: None,
            status,
            notes: None,
            self_register: true,
        }
    }

    fn management(teacher_id: i64, date: &str) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            teacher_id: Some(teacher_id),
            date: Some(date.to_string()),
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Absent,
            notes: None,
            self_register: false,
        }
    }

    #[tokio::test]
    async fn test_self_register_twice_keeps_one_row() {
        let (storage, ctx) = context().await;
        let (teacher, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;

        let first = create_attendance(
            &ctx,
            Some(&principal),
            self_register(AttendanceStatus::Present, "07:30"),
        )
        .await
        .unwrap();
        let second = create_attendance(
            &ctx,
            Some(&principal),
            self_register(AttendanceStatus::Late, "08:15"),
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.date, today());
        assert_eq!(second.status, AttendanceStatus::Late);
        assert_eq!(second.check_in.as_deref(), Some("08:15"));

        let page = ctx
            .storage
            .list_attendance(AttendanceListQuery {
                teacher_id: Some(teacher.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_check_out_keeps_morning_check_in() {
        let (storage, ctx) = context().await;
        let (_teacher, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;

        create_attendance(
            &ctx,
            Some(&principal),
            self_register(AttendanceStatus::Present, "07:30"),
        )
        .await
        .unwrap();
        let mut check_out = self_register(AttendanceStatus::Present, "07:30");
        check_out.check_in = None;
        check_out.check_out = Some("14:00".to_string());
        let record = create_attendance(&ctx, Some(&principal), check_out)
            .await
            .unwrap();

        assert_eq!(record.check_in.as_deref(), Some("07:30"));
        assert_eq!(record.check_out.as_deref(), Some("14:00"));
    }

    #[tokio::test]
    async fn test_self_register_without_profile() {
        let (storage, ctx) = context().await;
        let unlinked = staff_principal(&storage, "new@school.test", Role::Teacher).await;
        let err = create_attendance(
            &ctx,
            Some(&unlinked),
            self_register(AttendanceStatus::Present, "07:30"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[tokio::test]
    async fn test_teacher_cannot_register_others() {
        let (storage, ctx) = context().await;
        let (_teacher, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;
        let other = seed_teacher(&storage, "T-2", "Other").await;
        let err = create_attendance(&ctx, Some(&principal), management(other.id, "2025-01-05"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_management_duplicate_is_conflict() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = seed_teacher(&storage, "T-1", "One").await;

        let record = create_attendance(&ctx, Some(&manager), management(teacher.id, "2025-01-05"))
            .await
            .unwrap();
        assert_eq!(record.date, "2025-01-05");

        let err = create_attendance(&ctx, Some(&manager), management(teacher.id, "2025-01-05"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");

        let err = create_attendance(&ctx, Some(&manager), management(teacher.id + 99, "2025-01-05"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
