use tracing::info;

use crate::errors::Result;
use crate::models::accounts::entities::ParentAccount;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::parents::requests::{CreateParentRequest, NewParentAccount};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, require_text, validate_password};

pub async fn create_parent(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateParentRequest,
) -> Result<ParentAccount> {
    let principal = require(principal, Resource::Parent, Action::Create)?;

    let email = normalize_email(&req.email)?;
    require_text("display_name", &req.display_name)?;
    validate_password(&req.password)?;

    let parent = ctx
        .storage
        .create_parent_account(NewParentAccount {
            email,
            password_hash: hash_password(&req.password)?,
            display_name: req.display_name.trim().to_string(),
            phone: req.phone,
        })
        .await?;
    info!("家长账户 {} 已创建", parent.id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Parent,
            Some(parent.id),
            Some(serde_json::json!({ "email": parent.email })),
        )
        .await;

    Ok(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::auth::login::authenticate;
    use crate::services::test_support::{context, staff_principal};

    fn request(email: &str, password: &str) -> CreateParentRequest {
        CreateParentRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: "Huda".to_string(),
            phone: Some("0500000000".to_string()),
        }
    }

    #[tokio::test]
    async fn test_created_parent_can_log_in() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;

        let parent = create_parent(
            &ctx,
            Some(&manager),
            request(" Huda@Home.Test ", "FamilyPass9"),
        )
        .await
        .unwrap();
        assert_eq!(parent.email, "huda@home.test");
        assert_ne!(parent.password_hash, "FamilyPass9");

        let principal = authenticate(ctx.storage(), "huda@home.test", "FamilyPass9")
            .await
            .unwrap();
        assert_eq!(principal.id, parent.id);
        assert_eq!(principal.role, Role::Parent);

        assert_eq!(
            create_parent(&ctx, Some(&manager), request("huda@home.test", "FamilyPass9"))
                .await
                .unwrap_err()
                .code(),
            "E006"
        );
        assert_eq!(
            create_parent(&ctx, Some(&manager), request("other@home.test", "short"))
                .await
                .unwrap_err()
                .code(),
            "E005"
        );
    }

    #[tokio::test]
    async fn test_staff_email_is_not_reused_for_parent() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "shared@school.test", Role::Manager).await;

        let err = create_parent(
            &ctx,
            Some(&manager),
            request("shared@school.test", "ParentPass1"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E006");

        let parents = ctx
            .storage
            .list_parent_accounts(Default::default())
            .await
            .unwrap();
        assert_eq!(parents.pagination.total, 0);
    }
}
