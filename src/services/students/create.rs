use crate::errors::Result;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::require_text;

pub async fn create_student(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    mut req: CreateStudentRequest,
) -> Result<Student> {
    let principal = require(principal, Resource::Student, Action::Create)?;

    require_text("student_code", &req.student_code)?;
    require_text("display_name", &req.display_name)?;
    require_text("grade", &req.grade)?;
    req.student_code = req.student_code.trim().to_string();
    req.display_name = req.display_name.trim().to_string();
    req.grade = req.grade.trim().to_string();

    let student = ctx.storage.create_student(req).await?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Student,
            Some(student.id),
            Some(serde_json::json!({
                "student_code": student.student_code,
                "parent_id": student.parent_id,
            })),
        )
        .await;

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_parent;

    fn request(code: &str, parent_id: Option<i64>) -> CreateStudentRequest {
        CreateStudentRequest {
            student_code: code.to_string(),
            display_name: "Layla".to_string(),
            grade: "4".to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_create_student_rules() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let parent = seed_parent(&storage, "p@home.test").await;

        let student = create_student(&ctx, Some(&manager), request(" S-10 ", Some(parent.id)))
            .await
            .unwrap();
        assert_eq!(student.student_code, "S-10");
        assert_eq!(student.parent_id, Some(parent.id));

        assert_eq!(
            create_student(&ctx, Some(&teacher), request("S-11", None))
                .await
                .unwrap_err()
                .code(),
            "E003"
        );
        assert_eq!(
            create_student(&ctx, Some(&manager), request("S-10", None))
                .await
                .unwrap_err()
                .code(),
            "E006"
        );
        // 家长不存在
        assert_eq!(
            create_student(&ctx, Some(&manager), request("S-12", Some(999)))
                .await
                .unwrap_err()
                .code(),
            "E005"
        );
    }
}
