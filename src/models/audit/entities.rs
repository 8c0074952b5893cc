use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
    AuditAction("audit action") {
        Login => "login",
        Logout => "logout",
        Create => "create",
        Update => "update",
        Delete => "delete",
        Export => "export",
    }
}

// 审计日志，只追加
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLog {
    pub id: i64,
    /// 为空表示系统操作
    pub actor_id: Option<i64>,
    pub actor_role: Option<String>,
    pub action: AuditAction,
    pub entity: String,
    pub entity_id: Option<i64>,
    #[ts(type = "unknown")]
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
