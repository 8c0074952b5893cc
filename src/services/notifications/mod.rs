pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::{Principal, Role};
use crate::models::notifications::{
    entities::RecipientKind,
    requests::{NewNotification, NotificationListParams},
};
use crate::services::{ServiceContext, resolve_context};
use crate::storage::Storage;

/// 主体对应的通知接收者类型
pub fn recipient_kind(principal: &Principal) -> RecipientKind {
    if principal.role == Role::Parent {
        RecipientKind::Parent
    } else {
        RecipientKind::Staff
    }
}

/// 发送通知；失败只记录日志，不影响调用方
pub(crate) async fn notify(
    storage: &dyn Storage,
    recipient_id: i64,
    recipient_kind: RecipientKind,
    notification_type: &str,
    title: &str,
    message: String,
) {
    let result = storage
        .create_notification(NewNotification {
            recipient_id,
            recipient_kind,
            title: title.to_string(),
            message,
            notification_type: notification_type.to_string(),
        })
        .await;
    if let Err(e) = result {
        warn!("通知发送失败 ({} {}): {}", recipient_kind, recipient_id, e);
    }
}

pub struct NotificationService {
    context: Option<ServiceContext>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: NotificationListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_notifications(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Notifications retrieved successfully",
        )))
    }

    pub async fn unread_count(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::unread_count(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Unread count retrieved successfully",
        )))
    }

    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        read::mark_read(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read")))
    }

    pub async fn mark_all_read(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = read::mark_all_read(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "All notifications marked as read",
        )))
    }
}
