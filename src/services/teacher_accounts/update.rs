use crate::errors::{Result, SchoolError};
use crate::models::accounts::{
    requests::{StaffAccountUpdate, UpdateTeacherAccountRequest},
    responses::TeacherAccountView,
};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password;

/// 重置密码或启停用教师的登录账户
pub async fn update_teacher_account(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    teacher_id: i64,
    req: UpdateTeacherAccountRequest,
) -> Result<TeacherAccountView> {
    let principal = require(principal, Resource::TeacherAccount, Action::Update)?;

    let password_hash = match req.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let teacher = ctx
        .storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| SchoolError::not_found("Teacher not found"))?;
    let account_id = teacher
        .linked_account_id
        .ok_or_else(|| SchoolError::not_found("Teacher account not found"))?;

    let password_reset = password_hash.is_some();
    let account = ctx
        .storage
        .update_staff_account(
            account_id,
            StaffAccountUpdate {
                password_hash,
                active: req.active,
                display_name: None,
            },
        )
        .await?
        .ok_or_else(|| SchoolError::not_found("Teacher account not found"))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::TeacherAccount,
            Some(account_id),
            Some(serde_json::json!({
                "password_reset": password_reset,
                "active": req.active,
            })),
        )
        .await;

    Ok(TeacherAccountView {
        teacher,
        account: Some(account),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::auth::login::authenticate;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    #[tokio::test]
    async fn test_reset_password_and_deactivate() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;
        let (teacher, _) = linked_teacher(&storage, "T-1", "t1@school.test").await;

        update_teacher_account(
            &ctx,
            Some(&admin),
            teacher.id,
            UpdateTeacherAccountRequest {
                password: Some("NewPassw0rd".to_string()),
                active: None,
            },
        )
        .await
        .unwrap();
        assert!(
            authenticate(ctx.storage(), "t1@school.test", "NewPassw0rd")
                .await
                .is_ok()
        );

        let view = update_teacher_account(
            &ctx,
            Some(&admin),
            teacher.id,
            UpdateTeacherAccountRequest {
                password: None,
                active: Some(false),
            },
        )
        .await
        .unwrap();
        assert!(!view.account.unwrap().active);
        assert!(
            authenticate(ctx.storage(), "t1@school.test", "NewPassw0rd")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_unlinked_teacher_has_no_account() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;
        let teacher = seed_teacher(&storage, "T-2", "Noor").await;

        let err = update_teacher_account(
            &ctx,
            Some(&admin),
            teacher.id,
            UpdateTeacherAccountRequest {
                password: None,
                active: Some(false),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), "Teacher account not found");
    }
}
