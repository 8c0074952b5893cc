use crate::errors::{Result, SchoolError};
use crate::models::attendance::entities::AttendanceRecord;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub(crate) const NOT_FOUND: &str = "Attendance record not found";

pub async fn get_attendance(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<AttendanceRecord> {
    let principal = require(principal, Resource::Attendance, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Attendance).await?;

    match ctx.storage.get_attendance_by_id(id).await? {
        Some(record) if scope.permits_teacher(record.teacher_id) => Ok(record),
        _ => Err(SchoolError::not_found(NOT_FOUND)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{entities::AttendanceStatus, requests::NewAttendance};
    use crate::services::test_support::{context, linked_teacher};
    use actix_web::{ResponseError, body::MessageBody};

    #[tokio::test]
    async fn test_other_teachers_record_looks_missing() {
        let (storage, ctx) = context().await;
        let (_own, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;
        let (other, _) = linked_teacher(&storage, "T-2", "t2@school.test").await;
        let foreign = ctx
            .storage
            .create_attendance(NewAttendance {
                teacher_id: other.id,
                date: "2025-03-03".to_string(),
                check_in: Some("07:30".to_string()),
                check_out: None,
                status: AttendanceStatus::Present,
                notes: None,
            })
            .await
            .unwrap();

        let hidden = get_attendance(&ctx, Some(&principal), foreign.id)
            .await
            .unwrap_err();
        let missing = get_attendance(&ctx, Some(&principal), foreign.id + 1000)
            .await
            .unwrap_err();
        assert_eq!(hidden, missing);

        let hidden = hidden.error_response();
        let missing = missing.error_response();
        assert_eq!(hidden.status(), missing.status());
        assert_eq!(
            hidden.into_body().try_into_bytes().unwrap(),
            missing.into_body().try_into_bytes().unwrap()
        );
    }
}
