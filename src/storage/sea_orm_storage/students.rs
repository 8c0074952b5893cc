//! 学生档案存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use super::activities::delete_participations_where;
use crate::entity::participations::Column as ParticipationColumn;
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_code: Set(req.student_code),
            display_name: Set(req.display_name),
            grade: Set(req.grade),
            parent_id: Set(req.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("Student"))?;

        self.single_student(result).await
    }

    /// 通过 ID 获取学生档案
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_student(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出学生
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        if let Some(ref grade) = query.grade {
            select = select.filter(Column::Grade.eq(grade.as_str()));
        }
        if let Some(parent_id) = query.parent_id {
            select = select.filter(Column::ParentId.eq(parent_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::DisplayName.like(contains_pattern(search)))
                    .add(Column::StudentCode.like(contains_pattern(search))),
            );
        }

        let paginator = select
            .order_by_asc(Column::DisplayName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        let items = self.attach_parent_names(models).await?;

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 家长的全部子女
    pub async fn list_students_by_parent_impl(&self, parent_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::ParentId.eq(parent_id))
            .order_by_asc(Column::DisplayName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        self.attach_parent_names(models).await
    }

    /// 更新学生档案
    pub async fn update_student_impl(
        &self,
        id: i64,
        req: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(student_code) = req.student_code {
            model.student_code = Set(student_code);
        }
        if let Some(display_name) = req.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if req.clear_parent {
            model.parent_id = Set(None);
        } else if let Some(parent_id) = req.parent_id {
            model.parent_id = Set(Some(parent_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("Student"))?;

        Ok(Some(self.single_student(result).await?))
    }

    /// 删除学生：先删评价，再删参与记录，最后删学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        delete_participations_where(
            &txn,
            Condition::all().add(ParticipationColumn::StudentId.eq(id)),
        )
        .await?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量查询学生姓名
    pub(crate) async fn student_names_impl(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .select_only()
            .column(Column::Id)
            .column(Column::DisplayName)
            .filter(Column::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生信息失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    async fn attach_parent_names(&self, models: Vec<Model>) -> Result<Vec<Student>> {
        let parent_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.parent_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let parents = self.parent_names_impl(parent_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let name = m.parent_id.and_then(|id| parents.get(&id).cloned());
                m.into_student(name)
            })
            .collect())
    }

    async fn single_student(&self, model: Model) -> Result<Student> {
        self.attach_parent_names(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("学生转换结果为空"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::activity_evaluations::Entity as ActivityEvaluations;
    use crate::entity::participations::Entity as Participations;
    use crate::models::auth::entities::Role;
    use crate::models::participations::{
        entities::{ParticipationRole, ParticipationStatus},
        requests::{NewActivityEvaluation, NewParticipation, Participant},
    };
    use crate::storage::sea_orm_storage::test_support::{seed_activity, seed_staff, seed_student};

    #[tokio::test]
    async fn test_delete_student_cascades_participations_and_evaluations() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let evaluator = seed_staff(&storage, "judge@school.test", Role::Teacher).await;
        let student = seed_student(&storage, "S-100", None).await;
        let other = seed_student(&storage, "S-101", None).await;

        // M = 3 条参与记录，K = 2 条评价
        let mut participation_ids = Vec::new();
        for title in ["Art", "Music", "Drama"] {
            let activity = seed_activity(&storage, title, None).await;
            let participation = storage
                .create_participation_impl(NewParticipation {
                    activity_id: activity.id,
                    participant: Participant::Student(student.id),
                    role: ParticipationRole::Participant,
                    status: ParticipationStatus::Registered,
                    notes: None,
                })
                .await
                .unwrap();
            participation_ids.push(participation.id);
        }
        for participation_id in &participation_ids[..2] {
            storage
                .save_activity_evaluation_impl(NewActivityEvaluation {
                    participation_id: *participation_id,
                    evaluator_id: evaluator.id,
                    score: 8,
                    performance: None,
                    strengths: None,
                    improvements: None,
                    comments: None,
                })
                .await
                .unwrap();
        }
        let activity = seed_activity(&storage, "Sports", None).await;
        storage
            .create_participation_impl(NewParticipation {
                activity_id: activity.id,
                participant: Participant::Student(other.id),
                role: ParticipationRole::Participant,
                status: ParticipationStatus::Registered,
                notes: None,
            })
            .await
            .unwrap();

        assert!(storage.delete_student_impl(student.id).await.unwrap());

        assert!(storage.get_student_by_id_impl(student.id).await.unwrap().is_none());
        assert!(
            storage
                .list_activity_evaluations_for_impl(&participation_ids)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(Participations::find().count(&storage.db).await.unwrap(), 1);
        assert_eq!(ActivityEvaluations::find().count(&storage.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_parent() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let parent = crate::storage::sea_orm_storage::test_support::seed_parent(
            &storage,
            "mum@family.test",
        )
        .await;
        let student = seed_student(&storage, "S-102", Some(parent.id)).await;
        assert_eq!(student.parent_name.as_deref(), Some("Parent"));

        let updated = storage
            .update_student_impl(
                student.id,
                UpdateStudentRequest {
                    student_code: None,
                    display_name: None,
                    grade: None,
                    parent_id: None,
                    clear_parent: true,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.parent_id.is_none());
    }
}
