//! 账户存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::parent_accounts::{Column as ParentColumn, Entity as ParentAccounts};
use crate::entity::staff_accounts::{ActiveModel, Column, Entity as StaffAccounts};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::accounts::{
    entities::{ParentAccount, StaffAccount},
    requests::{NewStaffAccount, StaffAccountUpdate},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};

// 教职工与家长共用一个登录入口，邮箱在两张表之间也必须唯一

/// 邮箱已被教职工账户占用时返回 Conflict
pub(crate) async fn ensure_not_staff_email<C: ConnectionTrait>(
    conn: &C,
    context: &str,
    email: &str,
) -> Result<()> {
    let taken = StaffAccounts::find()
        .filter(Column::Email.eq(email))
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询教职工邮箱失败: {e}")))?;
    if taken > 0 {
        return Err(SchoolError::conflict(format!("{context}: email already in use")));
    }
    Ok(())
}

/// 邮箱已被家长账户占用时返回 Conflict
pub(crate) async fn ensure_not_parent_email<C: ConnectionTrait>(
    conn: &C,
    context: &str,
    email: &str,
) -> Result<()> {
    let taken = ParentAccounts::find()
        .filter(ParentColumn::Email.eq(email))
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询家长邮箱失败: {e}")))?;
    if taken > 0 {
        return Err(SchoolError::conflict(format!("{context}: email already in use")));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 通过邮箱获取教职工账户
    pub async fn get_staff_account_by_email_impl(
        &self,
        email: &str,
    ) -> Result<Option<StaffAccount>> {
        let result = StaffAccounts::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工账户失败: {e}")))?;

        Ok(result.map(|m| m.into_staff_account()))
    }

    /// 通过 ID 获取教职工账户
    pub async fn get_staff_account_by_id_impl(&self, id: i64) -> Result<Option<StaffAccount>> {
        let result = StaffAccounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工账户失败: {e}")))?;

        Ok(result.map(|m| m.into_staff_account()))
    }

    /// 创建教职工账户
    pub async fn create_staff_account_impl(&self, req: NewStaffAccount) -> Result<StaffAccount> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_not_parent_email(&txn, "Staff account", &req.email).await?;

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_error("Staff account"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_staff_account())
    }

    /// 教职工账户总数
    pub async fn count_staff_accounts_impl(&self) -> Result<u64> {
        StaffAccounts::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计教职工账户失败: {e}")))
    }

    /// 更新教职工账户
    pub async fn update_staff_account_impl(
        &self,
        id: i64,
        update: StaffAccountUpdate,
    ) -> Result<Option<StaffAccount>> {
        let Some(existing) = StaffAccounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工账户失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(active) = update.active {
            model.active = Set(active);
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Staff account"))?;

        Ok(Some(result.into_staff_account()))
    }

    /// 更新教职工最后登录时间
    pub async fn update_staff_last_login_impl(&self, id: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        StaffAccounts::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(())
    }

    /// 通过邮箱获取家长账户
    pub async fn get_parent_account_by_email_impl(
        &self,
        email: &str,
    ) -> Result<Option<ParentAccount>> {
        let result = ParentAccounts::find()
            .filter(ParentColumn::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长账户失败: {e}")))?;

        Ok(result.map(|m| m.into_parent_account()))
    }

    /// 更新家长最后登录时间
    pub async fn update_parent_last_login_impl(&self, id: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        ParentAccounts::update_many()
            .col_expr(ParentColumn::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(ParentColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(())
    }

    /// 批量查询教职工显示名
    pub(crate) async fn staff_names_impl(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = StaffAccounts::find()
            .select_only()
            .column(Column::Id)
            .column(Column::DisplayName)
            .filter(Column::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工信息失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 批量查询家长显示名
    pub(crate) async fn parent_names_impl(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = ParentAccounts::find()
            .select_only()
            .column(ParentColumn::Id)
            .column(ParentColumn::DisplayName)
            .filter(ParentColumn::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长信息失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
