//! 活动与活动分类存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::activities::{ActiveModel, ActivityExtras, Column, Entity as Activities, Model};
use crate::entity::activity_categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as ActivityCategories,
};
use crate::entity::activity_evaluations::{
    Column as ActivityEvaluationColumn, Entity as ActivityEvaluations,
};
use crate::entity::participations::{Column as ParticipationColumn, Entity as Participations};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    activities::{
        entities::{Activity, ActivityCategory, ActivityStatus},
        requests::{
            ActivityListQuery, CreateActivityCategoryRequest, CreateActivityRequest,
            UpdateActivityRequest,
        },
        responses::ActivityListResponse,
    },
    common::pagination::normalize_page,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出全部活动分类
    pub async fn list_activity_categories_impl(&self) -> Result<Vec<ActivityCategory>> {
        let models = ActivityCategories::find()
            .order_by_asc(CategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动分类失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_category()).collect())
    }

    /// 创建活动分类
    pub async fn create_activity_category_impl(
        &self,
        req: CreateActivityCategoryRequest,
    ) -> Result<ActivityCategory> {
        let model = CategoryActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            icon: Set(req.icon),
            color: Set(req.color),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Activity category"))?;

        Ok(result.into_category())
    }

    /// 创建活动
    pub async fn create_activity_impl(
        &self,
        created_by: i64,
        req: CreateActivityRequest,
    ) -> Result<Activity> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            category_id: Set(req.category_id),
            responsible_teacher_id: Set(req.responsible_teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            date: Set(req.date),
            end_date: Set(req.end_date),
            time: Set(req.time),
            location: Set(req.location),
            status: Set(req.status.unwrap_or(ActivityStatus::Upcoming).to_string()),
            max_participants: Set(req.max_participants),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("Activity"))?;

        self.single_activity(result).await
    }

    /// 通过 ID 获取活动（含分类、负责人与参与人数）
    pub async fn get_activity_by_id_impl(&self, id: i64) -> Result<Option<Activity>> {
        let result = Activities::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_activity(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出活动
    pub async fn list_activities_impl(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Activities::find();

        if let Some(category_id) = query.category_id {
            select = select.filter(Column::CategoryId.eq(category_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(contains_pattern(search)))
                    .add(Column::Description.like(contains_pattern(search)))
                    .add(Column::Location.like(contains_pattern(search))),
            );
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
            .map_err(|e| SchoolError::database_operation(format!("查询活动总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动列表失败: {e}")))?;

        let items = self.attach_activity_extras(models).await?;

        Ok(ActivityListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按 ID 批量获取活动
    pub async fn list_activities_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Activity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Activities::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?;

        self.attach_activity_extras(models).await
    }

    /// 更新活动
    pub async fn update_activity_impl(
        &self,
        id: i64,
        req: UpdateActivityRequest,
    ) -> Result<Option<Activity>> {
        let Some(existing) = Activities::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(category_id) = req.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(teacher_id) = req.responsible_teacher_id {
            model.responsible_teacher_id = Set(Some(teacher_id));
        }
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(date) = req.date {
            model.date = Set(date);
        }
        if let Some(end_date) = req.end_date {
            model.end_date = Set(Some(end_date));
        }
        if let Some(time) = req.time {
            model.time = Set(Some(time));
        }
        if let Some(location) = req.location {
            model.location = Set(Some(location));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(max_participants) = req.max_participants {
            model.max_participants = Set(Some(max_participants));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("Activity"))?;

        Ok(Some(self.single_activity(result).await?))
    }

    /// 删除活动，参与记录及其评价一并删除
    pub async fn delete_activity_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        delete_participations_where(
            &txn,
            Condition::all().add(ParticipationColumn::ActivityId.eq(id)),
        )
        .await?;

        let result = Activities::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量查询活动参与人数
    pub(crate) async fn participant_counts_impl(
        &self,
        activity_ids: Vec<i64>,
    ) -> Result<HashMap<i64, i64>> {
        if activity_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = Participations::find()
            .select_only()
            .column(ParticipationColumn::ActivityId)
            .column_as(ParticipationColumn::Id.count(), "count")
            .filter(ParticipationColumn::ActivityId.is_in(activity_ids))
            .group_by(ParticipationColumn::ActivityId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计参与人数失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 批量查询活动标题
    pub(crate) async fn activity_titles_impl(
        &self,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Activities::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Title)
            .filter(Column::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动信息失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    async fn attach_activity_extras(&self, models: Vec<Model>) -> Result<Vec<Activity>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let category_ids: Vec<i64> = models
            .iter()
            .map(|m| m.category_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let teacher_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.responsible_teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let categories: HashMap<i64, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            ActivityCategories::find()
                .select_only()
                .column(CategoryColumn::Id)
                .column(CategoryColumn::Name)
                .filter(CategoryColumn::Id.is_in(category_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询活动分类失败: {e}")))?
                .into_iter()
                .collect()
        };
        let teachers = self.teacher_names_impl(teacher_ids).await?;
        let counts = self.participant_counts_impl(ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let extras = ActivityExtras {
                    category_name: categories.get(&m.category_id).cloned(),
                    responsible_teacher_name: m
                        .responsible_teacher_id
                        .and_then(|id| teachers.get(&id).cloned()),
                    participant_count: counts.get(&m.id).copied().unwrap_or(0),
                };
                m.into_activity(extras)
            })
            .collect())
    }

    async fn single_activity(&self, model: Model) -> Result<Activity> {
        self.attach_activity_extras(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("活动转换结果为空"))
    }
}

/// 删除满足条件的参与记录及其评价，须在调用方的事务中执行
pub(crate) async fn delete_participations_where<C: ConnectionTrait>(
    conn: &C,
    condition: Condition,
) -> Result<u64> {
    let participation_ids: Vec<i64> = Participations::find()
        .select_only()
        .column(ParticipationColumn::Id)
        .filter(condition)
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询参与记录失败: {e}")))?;

    if participation_ids.is_empty() {
        return Ok(0);
    }

    ActivityEvaluations::delete_many()
        .filter(ActivityEvaluationColumn::ParticipationId.is_in(participation_ids.clone()))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("删除活动评价失败: {e}")))?;

    let result = Participations::delete_many()
        .filter(ParticipationColumn::Id.is_in(participation_ids))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("删除参与记录失败: {e}")))?;

    Ok(result.rows_affected)
}
