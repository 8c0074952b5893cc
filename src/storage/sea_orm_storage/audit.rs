//! 审计日志存储操作
//!
//! 只有追加与查询，没有更新或删除。

use super::SeaOrmStorage;
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    audit::{
        requests::{AuditLogListQuery, NewAuditLog},
        responses::AuditLogListResponse,
    },
    common::pagination::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 追加审计日志
    pub async fn append_audit_log_impl(&self, entry: NewAuditLog) -> Result<()> {
        let details = entry
            .details
            .map(|value| serde_json::to_string(&value))
            .transpose()?;

        let model = ActiveModel {
            actor_id: Set(entry.actor_id),
            actor_role: Set(entry.actor_role),
            action: Set(entry.action.to_string()),
            entity: Set(entry.entity),
            entity_id: Set(entry.entity_id),
            details: Set(details),
            ip_address: Set(entry.ip_address),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("写入审计日志失败: {e}")))?;

        Ok(())
    }

    /// 分页查询审计日志
    pub async fn list_audit_logs_impl(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AuditLogs::find();

        if let Some(actor_id) = query.actor_id {
            select = select.filter(Column::ActorId.eq(actor_id));
        }
        if let Some(ref entity) = query.entity {
            select = select.filter(Column::Entity.eq(entity.as_str()));
        }
        if let Some(action) = query.action {
            select = select.filter(Column::Action.eq(action.to_string()));
        }
        if let Some(from_ts) = query.from_ts {
            select = select.filter(Column::CreatedAt.gte(from_ts));
        }
        if let Some(to_ts) = query.to_ts {
            select = select.filter(Column::CreatedAt.lt(to_ts));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询审计日志总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询审计日志页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询审计日志列表失败: {e}")))?;

        Ok(AuditLogListResponse {
            items: models.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
