//! 家长账户存储操作

use super::SeaOrmStorage;
use super::accounts::ensure_not_staff_email;
use crate::entity::parent_accounts::{ActiveModel, Column, Entity as ParentAccounts};
use crate::entity::notifications::{Column as NotificationColumn, Entity as Notifications};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    accounts::entities::ParentAccount,
    notifications::entities::RecipientKind,
    common::pagination::normalize_page,
    parents::{
        requests::{NewParentAccount, ParentAccountUpdate, ParentListQuery},
        responses::ParentListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建家长账户
    pub async fn create_parent_account_impl(
        &self,
        req: NewParentAccount,
    ) -> Result<ParentAccount> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_not_staff_email(&txn, "Parent account", &req.email).await?;

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            display_name: Set(req.display_name),
            phone: Set(req.phone),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_error("Parent account"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_parent_account())
    }

    /// 通过 ID 获取家长账户
    pub async fn get_parent_account_by_id_impl(&self, id: i64) -> Result<Option<ParentAccount>> {
        let result = ParentAccounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长账户失败: {e}")))?;

        Ok(result.map(|m| m.into_parent_account()))
    }

    /// 分页列出家长账户
    pub async fn list_parent_accounts_impl(
        &self,
        query: ParentListQuery,
    ) -> Result<ParentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ParentAccounts::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::DisplayName.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::Phone.like(contains_pattern(search))),
            );
        }

        let paginator = select
            .order_by_asc(Column::DisplayName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长列表失败: {e}")))?;

        Ok(ParentListResponse {
            items: models
                .into_iter()
                .map(|m| m.into_parent_account())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新家长账户
    pub async fn update_parent_account_impl(
        &self,
        id: i64,
        update: ParentAccountUpdate,
    ) -> Result<Option<ParentAccount>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = ParentAccounts::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长账户失败: {e}")))?
        else {
            return Ok(None);
        };

        let existing_email = existing.email.clone();
        let mut model: ActiveModel = existing.into();

        if let Some(email) = update.email
            && email != existing_email
        {
            ensure_not_staff_email(&txn, "Parent account", &email).await?;
            model.email = Set(email);
        }
        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(active) = update.active {
            model.active = Set(active);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&txn)
            .await
            .map_err(db_error("Parent account"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(result.into_parent_account()))
    }

    /// 删除家长账户
    ///
    /// 子女的家长关联置空，不删除学生；该家长的通知一并删除。
    pub async fn delete_parent_account_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        Students::update_many()
            .col_expr(
                StudentColumn::ParentId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(StudentColumn::ParentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("解除子女关联失败: {e}")))?;

        Notifications::delete_many()
            .filter(NotificationColumn::RecipientKind.eq(RecipientKind::Parent.to_string()))
            .filter(NotificationColumn::RecipientId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除家长通知失败: {e}")))?;

        let result = ParentAccounts::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除家长账户失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
