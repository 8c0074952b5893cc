use crate::errors::Result;
use crate::models::activities::{
    entities::ActivityCategory, requests::CreateActivityCategoryRequest,
};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::require_text;

pub async fn create_category(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    mut req: CreateActivityCategoryRequest,
) -> Result<ActivityCategory> {
    let principal = require(principal, Resource::ActivityCategory, Action::Create)?;
    require_text("name", &req.name)?;
    req.name = req.name.trim().to_string();

    let category = ctx.storage.create_activity_category(req).await?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::ActivityCategory,
            Some(category.id),
            Some(serde_json::json!({ "name": category.name })),
        )
        .await;

    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::categories::list::list_categories;
    use crate::services::test_support::{context, staff_principal};

    fn request(name: &str) -> CreateActivityCategoryRequest {
        CreateActivityCategoryRequest {
            name: name.to_string(),
            description: None,
            icon: Some("trophy".to_string()),
            color: Some("#ffaa00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_public_list_and_management_create() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;

        create_category(&ctx, Some(&manager), request("Sports"))
            .await
            .unwrap();
        let err = create_category(&ctx, Some(&teacher), request("Music"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        let categories = list_categories(&ctx, None).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Sports");
    }
}
