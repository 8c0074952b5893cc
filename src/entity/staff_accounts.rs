//! 教职工账户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub active: bool,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_staff_account(self) -> crate::models::accounts::entities::StaffAccount {
        use crate::models::accounts::entities::StaffAccount;
        use crate::models::auth::entities::Role;
        use chrono::{DateTime, Utc};

        StaffAccount {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            // 未知角色按最低权限的教师处理
            role: self.role.parse::<Role>().unwrap_or(Role::Teacher),
            active: self.active,
            last_login: self
                .last_login
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
