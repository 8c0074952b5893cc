//! 教师登录账户存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::accounts::ensure_not_parent_email;
use crate::entity::staff_accounts::{
    ActiveModel as StaffActiveModel, Column as StaffColumn, Entity as StaffAccounts,
};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    accounts::{
        requests::NewStaffAccount,
        responses::{TeacherAccountListResponse, TeacherAccountView},
    },
    common::pagination::normalize_page,
    teachers::requests::TeacherListQuery,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 为教师开通登录账户
    ///
    /// 创建账户与写入关联在同一事务中完成。
    pub async fn grant_teacher_account_impl(
        &self,
        teacher_id: i64,
        req: NewStaffAccount,
    ) -> Result<TeacherAccountView> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let teacher = Teachers::find_by_id(teacher_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
            .ok_or_else(|| SchoolError::not_found("Teacher not found"))?;

        if teacher.linked_account_id.is_some() {
            return Err(SchoolError::conflict("Teacher already has a login account"));
        }
        ensure_not_parent_email(&txn, "Staff account", &req.email).await?;

        let now = chrono::Utc::now().timestamp();
        let account = StaffActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Staff account"))?;

        let mut model: ActiveModel = teacher.into();
        model.linked_account_id = Set(Some(account.id));
        model.updated_at = Set(now);
        let teacher = model.update(&txn).await.map_err(db_error("Teacher"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        let teacher = self
            .attach_teacher_lookups(vec![teacher])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("教师转换结果为空"))?;

        Ok(TeacherAccountView {
            teacher,
            account: Some(account.into_staff_account()),
        })
    }

    /// 列出教师及其登录账户
    pub async fn list_teacher_accounts_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherAccountListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let paginator = Self::teacher_filter(&query)
            .order_by_asc(Column::DisplayName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        let account_ids: Vec<i64> = models.iter().filter_map(|m| m.linked_account_id).collect();
        let accounts: HashMap<i64, _> = if account_ids.is_empty() {
            HashMap::new()
        } else {
            StaffAccounts::find()
                .filter(StaffColumn::Id.is_in(account_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询教职工账户失败: {e}")))?
                .into_iter()
                .map(|m| (m.id, m.into_staff_account()))
                .collect()
        };

        let teachers = self.attach_teacher_lookups(models).await?;
        let items = teachers
            .into_iter()
            .map(|teacher| {
                let account = teacher
                    .linked_account_id
                    .and_then(|id| accounts.get(&id).cloned());
                TeacherAccountView { teacher, account }
            })
            .collect();

        Ok(TeacherAccountListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::storage::sea_orm_storage::test_support::{seed_parent, seed_staff, seed_teacher};

    fn teacher_login(email: &str) -> NewStaffAccount {
        NewStaffAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: "Teacher".to_string(),
            role: Role::Teacher,
        }
    }

    #[tokio::test]
    async fn test_grant_twice_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-010", "Salma").await;

        storage
            .grant_teacher_account_impl(teacher.id, teacher_login("salma@school.test"))
            .await
            .unwrap();
        let err = storage
            .grant_teacher_account_impl(teacher.id, teacher_login("salma2@school.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_failed_grant_leaves_no_orphan_account() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        seed_staff(&storage, "taken@school.test", Role::Manager).await;
        let teacher = seed_teacher(&storage, "T-011", "Nour").await;

        let err = storage
            .grant_teacher_account_impl(teacher.id, teacher_login("taken@school.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));

        let reloaded = storage.get_teacher_by_id_impl(teacher.id).await.unwrap().unwrap();
        assert!(reloaded.linked_account_id.is_none());
        assert_eq!(storage.count_staff_accounts_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_grant_with_parent_email_is_rolled_back() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        seed_parent(&storage, "dad@home.test").await;
        let teacher = seed_teacher(&storage, "T-014", "Yara").await;

        let err = storage
            .grant_teacher_account_impl(teacher.id, teacher_login("dad@home.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));

        let reloaded = storage.get_teacher_by_id_impl(teacher.id).await.unwrap().unwrap();
        assert!(reloaded.linked_account_id.is_none());
        assert_eq!(storage.count_staff_accounts_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_grant_missing_teacher_is_not_found() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .grant_teacher_account_impl(999, teacher_login("ghost@school.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::NotFound(_)));
        assert_eq!(storage.count_staff_accounts_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_reports_link_state() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let linked = seed_teacher(&storage, "T-012", "Aya").await;
        seed_teacher(&storage, "T-013", "Bilal").await;
        storage
            .grant_teacher_account_impl(linked.id, teacher_login("aya@school.test"))
            .await
            .unwrap();

        let only_linked = storage
            .list_teacher_accounts_impl(TeacherListQuery {
                linked: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(only_linked.items.len(), 1);
        assert!(only_linked.items[0].account.is_some());

        let unlinked = storage
            .list_teacher_accounts_impl(TeacherListQuery {
                linked: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(unlinked.items.len(), 1);
        assert!(unlinked.items[0].account.is_none());
    }
}
