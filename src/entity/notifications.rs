//! 通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_id: i64,
    pub recipient_kind: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::notifications::entities::{Notification, RecipientKind};

        Notification {
            id: self.id,
            recipient_id: self.recipient_id,
            recipient_kind: self
                .recipient_kind
                .parse::<RecipientKind>()
                .unwrap_or(RecipientKind::Staff),
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
            is_read: self.is_read,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(self.created_at, 0)
                .unwrap_or_default(),
        }
    }
}
