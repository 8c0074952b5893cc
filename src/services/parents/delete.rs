use tracing::info;

use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

/// 删除家长；其子女保留，只解除关联
pub async fn delete_parent(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<()> {
    let principal = require(principal, Resource::Parent, Action::Delete)?;

    if !ctx.storage.delete_parent_account(id).await? {
        return Err(SchoolError::not_found(NOT_FOUND));
    }
    info!("家长 {} 已被 {} 删除", id, principal.id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Delete,
            Resource::Parent,
            Some(id),
            None,
        )
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::services::parents::get::get_parent;
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::{seed_parent, seed_student};

    #[tokio::test]
    async fn test_delete_detaches_children() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let parent = seed_parent(&storage, "p@home.test").await;
        let mut children = Vec::new();
        for code in ["S-1", "S-2", "S-3"] {
            children.push(seed_student(&storage, code, Some(parent.id)).await);
        }

        let detail = get_parent(&ctx, Some(&manager), parent.id).await.unwrap();
        assert_eq!(detail.children.len(), 3);

        delete_parent(&ctx, Some(&manager), parent.id).await.unwrap();

        assert!(
            ctx.storage
                .get_parent_account_by_id(parent.id)
                .await
                .unwrap()
                .is_none()
        );
        for child in children {
            let student = ctx.storage.get_student_by_id(child.id).await.unwrap().unwrap();
            assert_eq!(student.parent_id, None);
        }
        assert_eq!(
            get_parent(&ctx, Some(&manager), parent.id)
                .await
                .unwrap_err(),
            SchoolError::not_found(NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn test_teacher_cannot_manage_parents() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let parent = seed_parent(&storage, "p@home.test").await;
        assert_eq!(
            delete_parent(&ctx, Some(&teacher), parent.id)
                .await
                .unwrap_err()
                .code(),
            "E003"
        );
    }
}
