use tracing::info;

use crate::errors::{Result, SchoolError};
use crate::models::accounts::{
    requests::{GrantTeacherAccountRequest, NewStaffAccount},
    responses::TeacherAccountView,
};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::{Principal, Role};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_password};

/// 为教师档案开通登录账户
///
/// 账户角色固定为教师，显示名称取自档案。创建账户与写入关联是同一个事务。
pub async fn grant_teacher_account(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: GrantTeacherAccountRequest,
) -> Result<TeacherAccountView> {
    let principal = require(principal, Resource::TeacherAccount, Action::Create)?;

    let email = normalize_email(&req.email)?;
    validate_password(&req.password)?;

    let teacher = ctx
        .storage
        .get_teacher_by_id(req.teacher_id)
        .await?
        .ok_or_else(|| SchoolError::not_found("Teacher not found"))?;

    let account = NewStaffAccount {
        email,
        password_hash: hash_password(&req.password)?,
        display_name: teacher.display_name,
        role: Role::Teacher,
    };
    let view = ctx
        .storage
        .grant_teacher_account(req.teacher_id, account)
        .await?;

    let account_id = view.account.as_ref().map(|a| a.id);
    info!(
        "教师 {} 已开通登录账户 {:?}",
        view.teacher.employee_id, account_id
    );
    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::TeacherAccount,
            account_id,
            Some(serde_json::json!({ "teacher_id": view.teacher.id })),
        )
        .await;

    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;
    use crate::storage::Storage;

    fn request(teacher_id: i64, email: &str) -> GrantTeacherAccountRequest {
        GrantTeacherAccountRequest {
            teacher_id,
            email: email.to_string(),
            password: "Welcome2School".to_string(),
        }
    }

    #[tokio::test]
    async fn test_grant_links_profile() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;
        let teacher = seed_teacher(&storage, "T-7", "Rana").await;

        let view = grant_teacher_account(&ctx, Some(&admin), request(teacher.id, "rana@school.test"))
            .await
            .unwrap();
        let account = view.account.unwrap();
        assert_eq!(account.role, Role::Teacher);
        assert_eq!(account.display_name, "Rana");
        assert_eq!(view.teacher.linked_account_id, Some(account.id));

        let err = grant_teacher_account(&ctx, Some(&admin), request(teacher.id, "other@school.test"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_manager_cannot_grant() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = seed_teacher(&storage, "T-8", "Sami").await;

        let err = grant_teacher_account(&ctx, Some(&manager), request(teacher.id, "s@school.test"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(
            storage
                .get_teacher_by_id(teacher.id)
                .await
                .unwrap()
                .unwrap()
                .linked_account_id
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_weak_password_rejected_before_write() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;
        let teacher = seed_teacher(&storage, "T-9", "Lina").await;

        let mut req = request(teacher.id, "lina@school.test");
        req.password = "short".to_string();
        let err = grant_teacher_account(&ctx, Some(&admin), req).await.unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(
            storage
                .get_staff_account_by_email("lina@school.test")
                .await
                .unwrap()
                .is_none()
        );
    }
}
