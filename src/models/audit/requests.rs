use serde::Deserialize;
use ts_rs::TS;

use super::entities::AuditAction;
use crate::models::common::PaginationQuery;

// 审计日志查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLogListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub actor_id: Option<i64>,
    pub entity: Option<String>,
    pub action: Option<AuditAction>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 审计日志查询参数（用于存储层，日期已转为时间戳）
#[derive(Debug, Clone, Default)]
pub struct AuditLogListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub actor_id: Option<i64>,
    pub entity: Option<String>,
    pub action: Option<AuditAction>,
    pub from_ts: Option<i64>,
    pub to_ts: Option<i64>,
}

// 写入审计日志（存储层参数）
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<i64>,
    pub actor_role: Option<String>,
    pub action: AuditAction,
    pub entity: String,
    pub entity_id: Option<i64>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}
