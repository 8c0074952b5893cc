//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    notifications::{
        entities::{Notification, RecipientKind},
        requests::NewNotification,
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set,
};

impl SeaOrmStorage {
    /// 创建通知
    pub async fn create_notification_impl(&self, req: NewNotification) -> Result<Notification> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            recipient_id: Set(req.recipient_id),
            recipient_kind: Set(req.recipient_kind.to_string()),
            title: Set(req.title),
            message: Set(req.message),
            notification_type: Set(req.notification_type),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 列出接收者的通知（分页）
    pub async fn list_notifications_impl(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
        unread_only: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<NotificationListResponse> {
        let (page, size) = normalize_page(page, size);

        let mut select = Self::recipient_filter(recipient_id, kind);

        // 未读筛选
        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询通知页数失败: {e}")))?;
        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 未读通知数量
    pub async fn count_unread_notifications_impl(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<i64> {
        let count = Self::recipient_filter(recipient_id, kind)
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询未读通知数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记本人的一条通知为已读
    pub async fn mark_notification_read_impl(
        &self,
        id: i64,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::RecipientKind.eq(kind.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记本人所有通知为已读
    pub async fn mark_all_notifications_read_impl(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::RecipientKind.eq(kind.to_string()))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("标记全部通知已读失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }

    fn recipient_filter(recipient_id: i64, kind: RecipientKind) -> Select<Notifications> {
        Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::RecipientKind.eq(kind.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(recipient_id: i64, kind: RecipientKind) -> NewNotification {
        NewNotification {
            recipient_id,
            recipient_kind: kind,
            title: "New note".to_string(),
            message: "A note was added".to_string(),
            notification_type: "note".to_string(),
        }
    }

    #[tokio::test]
    async fn test_staff_and_parent_ids_do_not_collide() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_notification_impl(notice(1, RecipientKind::Staff))
            .await
            .unwrap();
        let parent_notice = storage
            .create_notification_impl(notice(1, RecipientKind::Parent))
            .await
            .unwrap();

        assert_eq!(
            storage
                .count_unread_notifications_impl(1, RecipientKind::Staff)
                .await
                .unwrap(),
            1
        );

        // 教职工不能标记同 id 家长的通知
        assert!(
            !storage
                .mark_notification_read_impl(parent_notice.id, 1, RecipientKind::Staff)
                .await
                .unwrap()
        );
        assert!(
            storage
                .mark_notification_read_impl(parent_notice.id, 1, RecipientKind::Parent)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_mark_all_and_unread_filter() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for _ in 0..3 {
            storage
                .create_notification_impl(notice(5, RecipientKind::Staff))
                .await
                .unwrap();
        }

        let marked = storage
            .mark_all_notifications_read_impl(5, RecipientKind::Staff)
            .await
            .unwrap();
        assert_eq!(marked, 3);

        let unread = storage
            .list_notifications_impl(5, RecipientKind::Staff, true, None, None)
            .await
            .unwrap();
        assert_eq!(unread.pagination.total, 0);

        let all = storage
            .list_notifications_impl(5, RecipientKind::Staff, false, None, None)
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);
        assert!(all.items.iter().all(|n| n.is_read));
    }
}
