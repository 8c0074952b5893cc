//! 评估存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations, Model};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    evaluations::{
        entities::Evaluation,
        requests::{EvaluationListQuery, NewEvaluation},
        responses::EvaluationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建评估
    pub async fn create_evaluation_impl(&self, req: NewEvaluation) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();
        let scores = req.scores;

        let model = ActiveModel {
            teacher_id: Set(req.teacher_id),
            evaluator_id: Set(req.evaluator_id),
            date: Set(req.date),
            teaching_quality: Set(scores.teaching_quality),
            punctuality: Set(scores.punctuality),
            student_interaction: Set(scores.student_interaction),
            curriculum_adherence: Set(scores.curriculum_adherence),
            lesson_planning: Set(scores.lesson_planning),
            lesson_planning_note: Set(req.notes.lesson_planning_note),
            lesson_execution: Set(scores.lesson_execution),
            lesson_execution_note: Set(req.notes.lesson_execution_note),
            classroom_management: Set(scores.classroom_management),
            classroom_management_note: Set(req.notes.classroom_management_note),
            professional_growth: Set(scores.professional_growth),
            professional_growth_note: Set(req.notes.professional_growth_note),
            overall_score: Set(req.overall_score),
            comments: Set(req.comments),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Evaluation"))?;

        self.attach_evaluation_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("评估转换结果为空"))
    }

    /// 通过 ID 获取评估
    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评估失败: {e}")))?;

        match result {
            Some(model) => Ok(self.attach_evaluation_names(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出评估
    pub async fn list_evaluations_impl(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Evaluations::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref start) = query.start_date {
            select = select.filter(Column::Date.gte(start.as_str()));
        }
        if let Some(ref end) = query.end_date {
            select = select.filter(Column::Date.lte(end.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评估总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评估页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评估列表失败: {e}")))?;

        let items = self.attach_evaluation_names(models).await?;

        Ok(EvaluationListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批量附加教师与评估人名称
    pub(crate) async fn attach_evaluation_names(
        &self,
        models: Vec<Model>,
    ) -> Result<Vec<Evaluation>> {
        let teacher_ids: Vec<i64> = models
            .iter()
            .map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let evaluator_ids: Vec<i64> = models
            .iter()
            .map(|m| m.evaluator_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let teachers = self.teacher_names_impl(teacher_ids).await?;
        let evaluators = self.staff_names_impl(evaluator_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher_name = teachers.get(&m.teacher_id).cloned();
                let evaluator_name = evaluators.get(&m.evaluator_id).cloned();
                m.into_evaluation(teacher_name, evaluator_name)
            })
            .collect())
    }
}
