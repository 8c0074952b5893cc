use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    /// 通知接收者类型；教职工与家长 id 取自不同的表
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
    RecipientKind("recipient kind") {
        Staff => "staff",
        Parent => "parent",
    }
}

// 通知
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub recipient_kind: RecipientKind,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
