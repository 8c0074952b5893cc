use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::services::ServiceContext;
use crate::utils::jwt::JwtUtils;

/// 注销总是成功；有会话时记录审计
pub async fn handle_logout(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> ActixResult<HttpResponse> {
    if let Some(p) = principal {
        ctx.audit.record_session(p, AuditAction::Logout).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_session_cookie())
        .json(ApiResponse::success_empty("Logged out successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit::requests::AuditLogListQuery;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, staff_principal};

    #[tokio::test]
    async fn test_logout_clears_cookie_and_audits_session() {
        let (storage, ctx) = context().await;
        let admin = staff_principal(&storage, "a@school.test", Role::Admin).await;

        let resp = handle_logout(&ctx, Some(&admin)).await.unwrap();
        let cookie = resp.cookies().next().unwrap();
        assert_eq!(cookie.value(), "");

        // 匿名注销同样成功，但不写审计
        handle_logout(&ctx, None).await.unwrap();

        let logs = ctx
            .storage
            .list_audit_logs(AuditLogListQuery {
                action: Some(AuditAction::Logout),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(logs.items.len(), 1);
        assert_eq!(logs.items[0].actor_id, Some(admin.id));
    }
}
