use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::notifications::responses::InboxClearedResponse;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

use super::recipient_kind;

/// 标记一条通知已读；不属于本人的通知视为不存在
pub async fn mark_read(ctx: &ServiceContext, principal: Option<&Principal>, id: i64) -> Result<()> {
    let principal = require(principal, Resource::Notification, Action::Update)?;
    let marked = ctx
        .storage
        .mark_notification_read(id, principal.id, recipient_kind(principal))
        .await?;
    if !marked {
        return Err(SchoolError::not_found("Notification not found"));
    }
    Ok(())
}

pub async fn mark_all_read(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<InboxClearedResponse> {
    let principal = require(principal, Resource::Notification, Action::Update)?;
    let marked_count = ctx
        .storage
        .mark_all_notifications_read(principal.id, recipient_kind(principal))
        .await?;
    Ok(InboxClearedResponse { marked_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::auth::entities::Role;
    use crate::models::notifications::{
        entities::RecipientKind, requests::NotificationListParams,
    };
    use crate::services::notifications::{list, notify};
    use crate::services::test_support::context;

    #[tokio::test]
    async fn test_staff_and_parent_with_same_id_are_separate() {
        let (_storage, ctx) = context().await;
        let staff = Principal::new(5, "Staff", Role::Teacher);
        let parent = Principal::new(5, "Parent", Role::Parent);

        notify(ctx.storage(), 5, RecipientKind::Staff, "note", "New note", "x".into()).await;
        notify(ctx.storage(), 5, RecipientKind::Parent, "evaluation", "New evaluation", "y".into())
            .await;

        let page = list::list_notifications(
            &ctx,
            Some(&parent),
            NotificationListParams {
                pagination: PaginationQuery::default(),
                unread_only: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "New evaluation");

        // 家长不能标记教职工的通知
        let staff_items = ctx
            .storage
            .list_notifications(5, RecipientKind::Staff, false, None, None)
            .await
            .unwrap();
        let err = mark_read(&ctx, Some(&parent), staff_items.items[0].id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");

        mark_read(&ctx, Some(&staff), staff_items.items[0].id)
            .await
            .unwrap();
        assert_eq!(
            list::unread_count(&ctx, Some(&staff)).await.unwrap().unread_count,
            0
        );
        assert_eq!(
            mark_all_read(&ctx, Some(&parent)).await.unwrap().marked_count,
            1
        );
    }

    #[tokio::test]
    async fn test_anonymous_rejected() {
        let (_storage, ctx) = context().await;
        assert_eq!(list::unread_count(&ctx, None).await.unwrap_err().code(), "E001");
    }
}
