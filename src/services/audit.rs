//! 审计记录
//!
//! 审计是尽力而为的旁路：写入失败只记录日志，不影响触发它的业务操作。

use std::sync::Arc;

use tracing::warn;

use crate::models::audit::{entities::AuditAction, requests::NewAuditLog};
use crate::models::auth::entities::{Principal, Role};
use crate::policy::Resource;
use crate::storage::AuditSink;

/// 绑定了请求来源 IP 的审计记录器
#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
    ip_address: Option<String>,
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>, ip_address: Option<String>) -> Self {
        Self { sink, ip_address }
    }

    /// 写入一条审计日志；`actor` 为空表示系统操作
    pub async fn record(
        &self,
        actor: Option<&Principal>,
        action: AuditAction,
        entity: Resource,
        entity_id: Option<i64>,
        details: Option<serde_json::Value>,
    ) {
        self.append(actor, action, entity.tag(), entity_id, details)
            .await;
    }

    /// 登录与注销，实体为主体所在的账户表
    pub async fn record_session(&self, principal: &Principal, action: AuditAction) {
        let entity = if principal.role == Role::Parent {
            "parent_account"
        } else {
            "staff_account"
        };
        self.append(Some(principal), action, entity, Some(principal.id), None)
            .await;
    }

    async fn append(
        &self,
        actor: Option<&Principal>,
        action: AuditAction,
        entity: &str,
        entity_id: Option<i64>,
        details: Option<serde_json::Value>,
    ) {
        let entry = NewAuditLog {
            actor_id: actor.map(|p| p.id),
            actor_role: actor.map(|p| p.role.to_string()),
            action,
            entity: entity.to_string(),
            entity_id,
            details,
            ip_address: self.ip_address.clone(),
        };
        if let Err(e) = self.sink.append_audit_log(entry).await {
            warn!("审计日志写入失败 ({} {} {:?}): {}", action, entity, entity_id, e);
        }
    }
}

/// 总是失败的写入端，用于验证审计失败不影响业务
#[cfg(test)]
pub(crate) struct FailingAuditSink;

#[cfg(test)]
#[async_trait::async_trait]
impl AuditSink for FailingAuditSink {
    async fn append_audit_log(&self, _entry: NewAuditLog) -> crate::errors::Result<()> {
        Err(crate::errors::SchoolError::database_operation(
            "audit table unavailable",
        ))
    }
}
