use serde::Deserialize;
use ts_rs::TS;

use super::entities::RecipientKind;
use crate::models::common::PaginationQuery;

// 通知列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}

// 新建通知（存储层参数）
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub recipient_kind: RecipientKind,
    pub title: String,
    pub message: String,
    pub notification_type: String,
}
