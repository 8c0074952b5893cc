use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::notifications::{
    requests::NotificationListParams,
    responses::{NotificationListResponse, UnreadCountResponse},
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

use super::recipient_kind;

/// 本人的通知
pub async fn list_notifications(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: NotificationListParams,
) -> Result<NotificationListResponse> {
    let principal = require(principal, Resource::Notification, Action::Read)?;
    ctx.storage
        .list_notifications(
            principal.id,
            recipient_kind(principal),
            params.unread_only.unwrap_or(false),
            Some(params.pagination.page),
            Some(params.pagination.size),
        )
        .await
}

pub async fn unread_count(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<UnreadCountResponse> {
    let principal = require(principal, Resource::Notification, Action::Read)?;
    let kind = recipient_kind(principal);
    let unread_count = ctx
        .storage
        .count_unread_notifications(principal.id, kind)
        .await?;
    Ok(UnreadCountResponse {
        recipient_kind: kind,
        unread_count,
    })
}
