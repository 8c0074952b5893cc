use serde::Serialize;
use ts_rs::TS;

use super::entities::{Notification, RecipientKind};
use crate::models::common::PaginationInfo;

/// 当前主体收件箱的一页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub pagination: PaginationInfo,
}

/// 收件箱未读数，附带接收者类型便于前端区分教职工与家长
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UnreadCountResponse {
    pub recipient_kind: RecipientKind,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct InboxClearedResponse {
    /// 本次由未读变为已读的条数
    pub marked_count: i64,
}
