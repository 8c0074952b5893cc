use tracing::info;

use crate::errors::Result;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::teachers::{entities::Teacher, requests::CreateTeacherRequest};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::{normalize_date, normalize_email, require_text};

pub async fn create_teacher(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    mut req: CreateTeacherRequest,
) -> Result<Teacher> {
    let principal = require(principal, Resource::Teacher, Action::Create)?;

    require_text("employee_id", &req.employee_id)?;
    require_text("display_name", &req.display_name)?;
    req.employee_id = req.employee_id.trim().to_string();
    req.display_name = req.display_name.trim().to_string();
    req.email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(normalize_email)
        .transpose()?;
    req.hire_date = normalize_date("hire_date", req.hire_date.as_deref())?;

    let teacher = ctx.storage.create_teacher(req).await?;
    info!("教师 {} ({}) 已创建", teacher.display_name, teacher.employee_id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Teacher,
            Some(teacher.id),
            Some(serde_json::json!({ "employee_id": teacher.employee_id })),
        )
        .await;

    Ok(teacher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, context_with_failing_audit, staff_principal};

    fn request(employee_id: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            employee_id: employee_id.to_string(),
            display_name: "Nour".to_string(),
            department_id: None,
            subject_id: None,
            status: None,
            email: Some(" Nour@School.test ".to_string()),
            phone: None,
            hire_date: Some("2024-09-01".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_and_rejects_duplicates() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;

        let teacher = create_teacher(&ctx, Some(&manager), request("E-1"))
            .await
            .unwrap();
        assert_eq!(teacher.email.as_deref(), Some("nour@school.test"));

        let err = create_teacher(&ctx, Some(&manager), request("E-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_teacher_cannot_create() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let err = create_teacher(&ctx, Some(&teacher), request("E-2"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_create_succeeds_when_audit_fails() {
        let (storage, ctx) = context_with_failing_audit().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = create_teacher(&ctx, Some(&manager), request("E-3"))
            .await
            .unwrap();
        assert!(
            ctx.storage
                .get_teacher_by_id(teacher.id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
