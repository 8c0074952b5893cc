//! 审计日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_role: Option<String>,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit_log(self) -> crate::models::audit::entities::AuditLog {
        use crate::models::audit::entities::{AuditAction, AuditLog};

        AuditLog {
            id: self.id,
            actor_id: self.actor_id,
            actor_role: self.actor_role,
            action: self
                .action
                .parse::<AuditAction>()
                .unwrap_or(AuditAction::Update),
            entity: self.entity,
            entity_id: self.entity_id,
            // details 以 JSON 字符串保存
            details: self
                .details
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            ip_address: self.ip_address,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(self.created_at, 0)
                .unwrap_or_default(),
        }
    }
}
