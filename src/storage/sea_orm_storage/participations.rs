//! 活动参与与表现评价存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use super::activities::delete_participations_where;
use crate::entity::activities::Entity as Activities;
use crate::entity::activity_evaluations::{
    ActiveModel as EvaluationActiveModel, Column as EvaluationColumn,
    Entity as ActivityEvaluations, Model as EvaluationModel,
};
use crate::entity::participations::{
    ActiveModel, Column, Entity as Participations, Model, ParticipationNames,
};
use crate::entity::students::Entity as Students;
use crate::entity::teachers::Entity as Teachers;
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    participations::{
        entities::{ActivityEvaluation, Participation},
        requests::{
            NewActivityEvaluation, NewParticipation, Participant, ParticipationListQuery,
            UpdateParticipationRequest,
        },
        responses::ParticipationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建参与记录
    ///
    /// 活动与参与者必须存在；活动设置了人数上限时不得超出。
    pub async fn create_participation_impl(&self, req: NewParticipation) -> Result<Participation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let activity = Activities::find_by_id(req.activity_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?
            .ok_or_else(|| SchoolError::invalid_input("activity_id: activity does not exist"))?;

        let (student_id, teacher_id) = match req.participant {
            Participant::Student(id) => {
                Students::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
                    .ok_or_else(|| SchoolError::invalid_input("student_id: student does not exist"))?;
                (Some(id), None)
            }
            Participant::Teacher(id) => {
                Teachers::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
                    .ok_or_else(|| SchoolError::invalid_input("teacher_id: teacher does not exist"))?;
                (None, Some(id))
            }
        };

        if let Some(max) = activity.max_participants {
            let current = Participations::find()
                .filter(Column::ActivityId.eq(activity.id))
                .count(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("统计参与人数失败: {e}")))?;
            if current >= max.max(0) as u64 {
                return Err(SchoolError::invalid_input("Activity is full"));
            }
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            activity_id: Set(req.activity_id),
            student_id: Set(student_id),
            teacher_id: Set(teacher_id),
            role: Set(req.role.to_string()),
            status: Set(req.status.to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(db_error("Participation"))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.single_participation(result).await
    }

    /// 通过 ID 获取参与记录
    pub async fn get_participation_by_id_impl(&self, id: i64) -> Result<Option<Participation>> {
        let result = Participations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_participation(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出参与记录
    pub async fn list_participations_impl(
        &self,
        query: ParticipationListQuery,
    ) -> Result<ParticipationListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Participations::find();

        if let Some(activity_id) = query.activity_id {
            select = select.filter(Column::ActivityId.eq(activity_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录列表失败: {e}")))?;

        let items = self.attach_participation_names(models).await?;

        Ok(ParticipationListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生的全部参与记录
    pub async fn list_participations_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Participation>> {
        let models = Participations::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录失败: {e}")))?;

        self.attach_participation_names(models).await
    }

    /// 更新参与记录的角色、状态与备注
    pub async fn update_participation_impl(
        &self,
        id: i64,
        req: UpdateParticipationRequest,
    ) -> Result<Option<Participation>> {
        let Some(existing) = Participations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询参与记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(role) = req.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(notes) = req.notes {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Participation"))?;

        Ok(Some(self.single_participation(result).await?))
    }

    /// 删除参与记录及其评价
    pub async fn delete_participation_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted =
            delete_participations_where(&txn, Condition::all().add(Column::Id.eq(id))).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted > 0)
    }

    /// 参与记录最新的一条评价
    pub async fn get_latest_activity_evaluation_impl(
        &self,
        participation_id: i64,
    ) -> Result<Option<ActivityEvaluation>> {
        let result = ActivityEvaluations::find()
            .filter(EvaluationColumn::ParticipationId.eq(participation_id))
            .order_by_desc(EvaluationColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动评价失败: {e}")))?;

        match result {
            Some(model) => Ok(self.attach_evaluator_names(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 保存活动评价：已有则更新最新一条，否则新建
    pub async fn save_activity_evaluation_impl(
        &self,
        req: NewActivityEvaluation,
    ) -> Result<ActivityEvaluation> {
        let now = chrono::Utc::now().timestamp();

        let existing = ActivityEvaluations::find()
            .filter(EvaluationColumn::ParticipationId.eq(req.participation_id))
            .order_by_desc(EvaluationColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动评价失败: {e}")))?;

        let result = match existing {
            Some(existing) => {
                let mut model: EvaluationActiveModel = existing.into();
                model.evaluator_id = Set(req.evaluator_id);
                model.score = Set(req.score);
                model.performance = Set(req.performance);
                model.strengths = Set(req.strengths);
                model.improvements = Set(req.improvements);
                model.comments = Set(req.comments);
                model.updated_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(db_error("Activity evaluation"))?
            }
            None => EvaluationActiveModel {
                participation_id: Set(req.participation_id),
                evaluator_id: Set(req.evaluator_id),
                score: Set(req.score),
                performance: Set(req.performance),
                strengths: Set(req.strengths),
                improvements: Set(req.improvements),
                comments: Set(req.comments),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(db_error("Activity evaluation"))?,
        };

        self.attach_evaluator_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("活动评价转换结果为空"))
    }

    /// 批量获取参与记录的评价
    pub async fn list_activity_evaluations_for_impl(
        &self,
        participation_ids: &[i64],
    ) -> Result<Vec<ActivityEvaluation>> {
        if participation_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = ActivityEvaluations::find()
            .filter(EvaluationColumn::ParticipationId.is_in(participation_ids.to_vec()))
            .order_by_desc(EvaluationColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动评价失败: {e}")))?;

        self.attach_evaluator_names(models).await
    }

    async fn attach_participation_names(&self, models: Vec<Model>) -> Result<Vec<Participation>> {
        let activity_ids: Vec<i64> = models
            .iter()
            .map(|m| m.activity_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let student_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let teacher_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let activities = self.activity_titles_impl(activity_ids).await?;
        let students = self.student_names_impl(student_ids).await?;
        let teachers = self.teacher_names_impl(teacher_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let names = ParticipationNames {
                    activity_title: activities.get(&m.activity_id).cloned(),
                    student_name: m.student_id.and_then(|id| students.get(&id).cloned()),
                    teacher_name: m.teacher_id.and_then(|id| teachers.get(&id).cloned()),
                };
                m.into_participation(names)
            })
            .collect())
    }

    async fn single_participation(&self, model: Model) -> Result<Participation> {
        self.attach_participation_names(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("参与记录转换结果为空"))
    }

    async fn attach_evaluator_names(
        &self,
        models: Vec<EvaluationModel>,
    ) -> Result<Vec<ActivityEvaluation>> {
        let evaluator_ids: Vec<i64> = models
            .iter()
            .map(|m| m.evaluator_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let evaluators = self.staff_names_impl(evaluator_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let name = evaluators.get(&m.evaluator_id).cloned();
                m.into_activity_evaluation(name)
            })
            .collect())
    }
}
