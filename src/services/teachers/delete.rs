use tracing::info;

use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn delete_teacher(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<()> {
    let principal = require(principal, Resource::Teacher, Action::Delete)?;

    if !ctx.storage.delete_teacher(id).await? {
        return Err(SchoolError::not_found("Teacher not found"));
    }
    info!("教师 {} 已被 {} 删除", id, principal.id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Delete,
            Resource::Teacher,
            Some(id),
            None,
        )
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::requests::CreateActivityRequest;
    use crate::models::attendance::{entities::AttendanceStatus, requests::NewAttendance};
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_activity;

    #[tokio::test]
    async fn test_delete_removes_records_and_frees_activities() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let (teacher, teacher_principal) = linked_teacher(&storage, "T-9", "t9@school.test").await;

        let record = storage
            .create_attendance_impl(NewAttendance {
                teacher_id: teacher.id,
                date: "2025-03-02".to_string(),
                check_in: None,
                check_out: None,
                status: AttendanceStatus::Present,
                notes: None,
            })
            .await
            .unwrap();
        let existing = seed_activity(&storage, "Trip", None).await;
        let led = storage
            .create_activity_impl(
                manager.id,
                CreateActivityRequest {
                    category_id: existing.category_id,
                    responsible_teacher_id: Some(teacher.id),
                    title: "Science fair".to_string(),
                    description: None,
                    date: "2025-04-01".to_string(),
                    end_date: None,
                    time: None,
                    location: None,
                    status: None,
                    max_participants: None,
                },
            )
            .await
            .unwrap();

        let denied = delete_teacher(&ctx, Some(&teacher_principal), teacher.id)
            .await
            .unwrap_err();
        assert_eq!(denied.code(), "E003");

        delete_teacher(&ctx, Some(&manager), teacher.id).await.unwrap();
        assert!(ctx.storage.get_teacher_by_id(teacher.id).await.unwrap().is_none());
        assert!(ctx.storage.get_attendance_by_id(record.id).await.unwrap().is_none());
        let activity = ctx.storage.get_activity_by_id(led.id).await.unwrap().unwrap();
        assert_eq!(activity.responsible_teacher_id, None);

        let again = delete_teacher(&ctx, Some(&manager), teacher.id).await.unwrap_err();
        assert_eq!(again.code(), "E004");
    }
}
