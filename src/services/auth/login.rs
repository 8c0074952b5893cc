use actix_web::{HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::{Result, SchoolError};
use crate::models::ApiResponse;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::{
    entities::{Principal, Role},
    requests::LoginRequest,
    responses::LoginResponse,
};
use crate::services::ServiceContext;
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, SESSION_LIFETIME_HOURS};
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 校验邮箱与密码
///
/// 先查教职工账户，找不到再查家长账户。账户不存在、已停用、密码错误
/// 返回同一个错误，不暴露邮箱是否存在。
pub async fn authenticate(storage: &dyn Storage, email: &str, password: &str) -> Result<Principal> {
    let email = email.trim().to_lowercase();

    if let Some(account) = storage.get_staff_account_by_email(&email).await? {
        if !account.active || !verify_password(password, &account.password_hash) {
            return Err(SchoolError::invalid_credentials(INVALID_CREDENTIALS));
        }
        return Ok(Principal::new(
            account.id,
            account.display_name,
            account.role,
        ));
    }

    if let Some(account) = storage.get_parent_account_by_email(&email).await? {
        if !account.active || !verify_password(password, &account.password_hash) {
            return Err(SchoolError::invalid_credentials(INVALID_CREDENTIALS));
        }
        return Ok(Principal::new(
            account.id,
            account.display_name,
            Role::Parent,
        ));
    }

    Err(SchoolError::invalid_credentials(INVALID_CREDENTIALS))
}

/// 登录：校验凭据、签发令牌、更新最后登录时间并记录审计
pub async fn login(ctx: &ServiceContext, req: LoginRequest) -> Result<(LoginResponse, String)> {
    let principal = match authenticate(ctx.storage(), &req.email, &req.password).await {
        Ok(principal) => principal,
        Err(e) => {
            info!("登录失败: {}", e.message());
            return Err(e);
        }
    };

    let token = JwtUtils::issue_session_token(&principal).map_err(|e| {
        error!("会话令牌签发失败: {}", e);
        SchoolError::internal(format!("会话令牌签发失败: {e}"))
    })?;

    let touched = match principal.role {
        Role::Parent => ctx.storage.update_parent_last_login(principal.id).await,
        _ => ctx.storage.update_staff_last_login(principal.id).await,
    };
    if let Err(e) = touched {
        error!("更新最后登录时间失败: {}", e);
    }

    ctx.audit
        .record_session(&principal, AuditAction::Login)
        .await;

    info!("{} ({}) 登录成功", principal.display_name, principal.role);

    Ok((
        LoginResponse {
            user: principal,
            expires_in: SESSION_LIFETIME_HOURS * 3600,
        },
        token,
    ))
}

pub async fn handle_login(ctx: &ServiceContext, req: LoginRequest) -> ActixResult<HttpResponse> {
    let (response, token) = login(ctx, req).await?;
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_session_cookie(&token))
        .json(ApiResponse::success(response, "Login successful")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::requests::{NewStaffAccount, StaffAccountUpdate};
    use crate::models::parents::requests::NewParentAccount;
    use crate::services::test_support::context;
    use crate::utils::password::hash_password;

    async fn seed(ctx: &ServiceContext) -> (i64, i64) {
        let staff = ctx
            .storage
            .create_staff_account(NewStaffAccount {
                email: "shared@school.test".to_string(),
                password_hash: hash_password("StaffPass1").unwrap(),
                display_name: "Staff".to_string(),
                role: Role::Manager,
            })
            .await
            .unwrap();
        let parent = ctx
            .storage
            .create_parent_account(NewParentAccount {
                email: "mum@home.test".to_string(),
                password_hash: hash_password("ParentPass1").unwrap(),
                display_name: "Mum".to_string(),
                phone: None,
            })
            .await
            .unwrap();
        (staff.id, parent.id)
    }

    #[tokio::test]
    async fn test_staff_and_parent_login() {
        let (_storage, ctx) = context().await;
        let (staff_id, parent_id) = seed(&ctx).await;

        let staff = authenticate(ctx.storage(), "Shared@School.test", "StaffPass1")
            .await
            .unwrap();
        assert_eq!(staff, Principal::new(staff_id, "Staff", Role::Manager));

        let parent = authenticate(ctx.storage(), "mum@home.test", "ParentPass1")
            .await
            .unwrap();
        assert_eq!(parent.role, Role::Parent);
        assert_eq!(parent.id, parent_id);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (_storage, ctx) = context().await;
        let (staff_id, _) = seed(&ctx).await;

        let wrong_password = authenticate(ctx.storage(), "shared@school.test", "nope")
            .await
            .unwrap_err();
        let unknown = authenticate(ctx.storage(), "ghost@school.test", "StaffPass1")
            .await
            .unwrap_err();

        ctx.storage
            .update_staff_account(
                staff_id,
                StaffAccountUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let inactive = authenticate(ctx.storage(), "shared@school.test", "StaffPass1")
            .await
            .unwrap_err();

        assert_eq!(wrong_password, unknown);
        assert_eq!(unknown, inactive);
        assert_eq!(inactive.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_issues_token_and_touches_account() {
        let (_storage, ctx) = context().await;
        let (staff_id, _) = seed(&ctx).await;

        let (response, token) = login(
            &ctx,
            LoginRequest {
                email: "shared@school.test".to_string(),
                password: "StaffPass1".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.expires_in, 24 * 3600);
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.into_principal(), Some(response.user.clone()));

        let account = ctx
            .storage
            .get_staff_account_by_id(staff_id)
            .await
            .unwrap()
            .unwrap();
        assert!(account.last_login.is_some());
    }
}
