//! 教师档案存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use super::activities::delete_participations_where;
use crate::entity::activities::{Column as ActivityColumn, Entity as Activities};
use crate::entity::attendance::{Column as AttendanceColumn, Entity as Attendance};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::notes::{Column as NoteColumn, Entity as Notes};
use crate::entity::participations::Column as ParticipationColumn;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    teachers::{
        entities::{Teacher, TeacherStatus},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教师档案
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            employee_id: Set(req.employee_id),
            display_name: Set(req.display_name),
            department_id: Set(req.department_id),
            subject_id: Set(req.subject_id),
            status: Set(req.status.unwrap_or(TeacherStatus::Active).to_string()),
            email: Set(req.email),
            phone: Set(req.phone),
            hire_date: Set(req.hire_date),
            linked_account_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("Teacher"))?;

        self.single_teacher(result).await
    }

    /// 通过 ID 获取教师档案
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_teacher(model).await?)),
            None => Ok(None),
        }
    }

    /// 通过关联的登录账户获取教师档案
    pub async fn get_teacher_by_linked_account_impl(
        &self,
        account_id: i64,
    ) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::LinkedAccountId.eq(account_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_teacher(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出教师
    pub async fn list_teachers_impl(&self, query: TeacherListQuery) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let select = Self::teacher_filter(&query).order_by_asc(Column::DisplayName);

        let paginator = select.paginate(&self.db, size);
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

        let items = self.attach_teacher_lookups(models).await?;

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新教师档案
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        req: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(employee_id) = req.employee_id {
            model.employee_id = Set(employee_id);
        }
        if let Some(display_name) = req.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(department_id) = req.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(Some(subject_id));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(email) = req.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = req.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(hire_date) = req.hire_date {
            model.hire_date = Set(Some(hire_date));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("Teacher"))?;

        Ok(Some(self.single_teacher(result).await?))
    }

    /// 删除教师档案
    ///
    /// 考勤、评估、备注、教职工参与记录及其评价一并删除，负责的活动置空。
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        delete_participations_where(
            &txn,
            Condition::all().add(ParticipationColumn::TeacherId.eq(id)),
        )
        .await?;

        Attendance::delete_many()
            .filter(AttendanceColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考勤失败: {e}")))?;

        Evaluations::delete_many()
            .filter(EvaluationColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除评估失败: {e}")))?;

        Notes::delete_many()
            .filter(NoteColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除备注失败: {e}")))?;

        Activities::update_many()
            .col_expr(
                ActivityColumn::ResponsibleTeacherId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(ActivityColumn::ResponsibleTeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新活动负责人失败: {e}")))?;

        let result = Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量查询教师显示名
    pub(crate) async fn teacher_names_impl(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Teachers::find()
            .select_only()
            .column(Column::Id)
            .column(Column::DisplayName)
            .filter(Column::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师信息失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 列表查询条件
    pub(crate) fn teacher_filter(query: &TeacherListQuery) -> Select<Teachers> {
        let mut select = Teachers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::DisplayName.like(contains_pattern(search)))
                    .add(Column::EmployeeId.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search))),
            );
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::Id.eq(teacher_id));
        }

        match query.linked {
            Some(true) => select = select.filter(Column::LinkedAccountId.is_not_null()),
            Some(false) => select = select.filter(Column::LinkedAccountId.is_null()),
            None => {}
        }

        select
    }

    /// 批量附加部门与学科名称
    pub(crate) async fn attach_teacher_lookups(&self, models: Vec<Model>) -> Result<Vec<Teacher>> {
        let department_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.department_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let subject_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.subject_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let departments = self.department_names_impl(department_ids).await?;
        let subjects = self.subject_names_impl(subject_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let department_name = m.department_id.and_then(|id| departments.get(&id).cloned());
                let subject_name = m.subject_id.and_then(|id| subjects.get(&id).cloned());
                m.into_teacher(department_name, subject_name)
            })
            .collect())
    }

    async fn single_teacher(&self, model: Model) -> Result<Teacher> {
        self.attach_teacher_lookups(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("教师转换结果为空"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::{seed_teacher, seed_staff};

    #[tokio::test]
    async fn test_duplicate_employee_id_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        seed_teacher(&storage, "T-001", "Amal").await;

        let err = storage
            .create_teacher_impl(CreateTeacherRequest {
                employee_id: "T-001".to_string(),
                display_name: "Other".to_string(),
                department_id: None,
                subject_id: None,
                status: None,
                email: None,
                phone: None,
                hire_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_lookup_names() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let department = storage.create_department_impl("Science").await.unwrap();
        storage
            .create_teacher_impl(CreateTeacherRequest {
                employee_id: "T-100".to_string(),
                display_name: "Huda 50%".to_string(),
                department_id: Some(department.id),
                subject_id: None,
                status: Some(TeacherStatus::Active),
                email: None,
                phone: None,
                hire_date: None,
            })
            .await
            .unwrap();
        seed_teacher(&storage, "T-101", "Khaled").await;

        let all = storage
            .list_teachers_impl(TeacherListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);

        let searched = storage
            .list_teachers_impl(TeacherListQuery {
                search: Some("50%".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].department_name.as_deref(), Some("Science"));

        let by_department = storage
            .list_teachers_impl(TeacherListQuery {
                department_id: Some(department.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_department.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_linked_account_lookup() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-002", "Mona").await;
        let admin = seed_staff(&storage, "admin@school.test", crate::models::auth::entities::Role::Admin).await;
        assert!(
            storage
                .get_teacher_by_linked_account_impl(admin.id)
                .await
                .unwrap()
                .is_none()
        );

        let view = storage
            .grant_teacher_account_impl(
                teacher.id,
                crate::models::accounts::requests::NewStaffAccount {
                    email: "mona@school.test".to_string(),
                    password_hash: "hash".to_string(),
                    display_name: "Mona".to_string(),
                    role: crate::models::auth::entities::Role::Teacher,
                },
            )
            .await
            .unwrap();
        let account_id = view.account.unwrap().id;
        let linked = storage
            .get_teacher_by_linked_account_impl(account_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(linked.id, teacher.id);
    }
}
