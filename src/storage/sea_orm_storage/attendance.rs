//! 考勤存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance, Model};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceListQuery, NewAttendance, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    common::pagination::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
    sea_query::{Expr, OnConflict},
};

/// 冲突更新时新值为 NULL 则沿用已存值
fn keep_when_absent(column: &str) -> Expr {
    Expr::cust(format!("COALESCE(excluded.{column}, attendance.{column})"))
}

impl SeaOrmStorage {
    /// 插入考勤记录
    pub async fn create_attendance_impl(&self, req: NewAttendance) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(req.teacher_id),
            date: Set(req.date),
            check_in: Set(req.check_in),
            check_out: Set(req.check_out),
            status: Set(req.status.to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Attendance record"))?;

        self.single_attendance(result).await
    }

    /// 插入或覆盖考勤记录
    ///
    /// 依赖 (teacher_id, date) 唯一索引，并发写入时后到者更新先到者的记录。
    /// 签到、签退与备注只覆盖本次提供的值，未提供时保留原值。
    pub async fn upsert_attendance_impl(&self, req: NewAttendance) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();
        let teacher_id = req.teacher_id;
        let date = req.date.clone();

        let model = ActiveModel {
            teacher_id: Set(req.teacher_id),
            date: Set(req.date),
            check_in: Set(req.check_in),
            check_out: Set(req.check_out),
            status: Set(req.status.to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Attendance::insert(model)
            .on_conflict(
                OnConflict::columns([Column::TeacherId, Column::Date])
                    .value(Column::CheckIn, keep_when_absent("check_in"))
                    .value(Column::CheckOut, keep_when_absent("check_out"))
                    .value(Column::Notes, keep_when_absent("notes"))
                    .update_columns([Column::Status, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error("Attendance record"))?;

        let result = Attendance::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?
            .ok_or_else(|| SchoolError::database_operation("写入后未找到考勤记录"))?;

        self.single_attendance(result).await
    }

    /// 通过 ID 获取考勤记录
    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let result = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.single_attendance(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出考勤记录
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let paginator = Self::attendance_filter(&query)
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤列表失败: {e}")))?;

        let items = self.attach_attendance_names(models).await?;

        Ok(AttendanceListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考勤记录
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let Some(existing) = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(check_in) = req.check_in {
            model.check_in = Set(Some(check_in));
        }
        if let Some(check_out) = req.check_out {
            model.check_out = Set(Some(check_out));
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
            .map_err(db_error("Attendance record"))?;

        Ok(Some(self.single_attendance(result).await?))
    }

    /// 按状态分组计数
    pub async fn count_attendance_by_status_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<(AttendanceStatus, i64)>> {
        let rows: Vec<(String, i64)> = Self::attendance_filter(&query)
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(status, count)| {
                status
                    .parse::<AttendanceStatus>()
                    .ok()
                    .map(|status| (status, count))
            })
            .collect())
    }

    fn attendance_filter(query: &AttendanceListQuery) -> Select<Attendance> {
        let mut select = Attendance::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref start) = query.start_date {
            select = select.filter(Column::Date.gte(start.as_str()));
        }
        if let Some(ref end) = query.end_date {
            select = select.filter(Column::Date.lte(end.as_str()));
        }

        select
    }

    async fn attach_attendance_names(&self, models: Vec<Model>) -> Result<Vec<AttendanceRecord>> {
        let teacher_ids: Vec<i64> = models
            .iter()
            .map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let names = self.teacher_names_impl(teacher_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let name = names.get(&m.teacher_id).cloned();
                m.into_attendance(name)
            })
            .collect())
    }

    async fn single_attendance(&self, model: Model) -> Result<AttendanceRecord> {
        self.attach_attendance_names(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("考勤转换结果为空"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    fn record(teacher_id: i64, date: &str, status: AttendanceStatus) -> NewAttendance {
        NewAttendance {
            teacher_id,
            date: date.to_string(),
            check_in: Some("07:30".to_string()),
            check_out: None,
            status,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-020", "Rana").await;

        storage
            .create_attendance_impl(record(teacher.id, "2025-03-01", AttendanceStatus::Present))
            .await
            .unwrap();
        let err = storage
            .create_attendance_impl(record(teacher.id, "2025-03-01", AttendanceStatus::Late))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_day() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-021", "Omar").await;

        let first = storage
            .upsert_attendance_impl(record(teacher.id, "2025-03-02", AttendanceStatus::Present))
            .await
            .unwrap();
        let mut second_req = record(teacher.id, "2025-03-02", AttendanceStatus::Late);
        second_req.check_in = Some("08:15".to_string());
        let second = storage.upsert_attendance_impl(second_req).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);
        assert_eq!(second.check_in.as_deref(), Some("08:15"));

        let list = storage
            .list_attendance_impl(AttendanceListQuery {
                teacher_id: Some(teacher.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_upsert_keeps_fields_not_resubmitted() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-023", "Sami").await;

        let mut morning = record(teacher.id, "2025-03-04", AttendanceStatus::Present);
        morning.notes = Some("bus delay".to_string());
        storage.upsert_attendance_impl(morning).await.unwrap();

        let mut afternoon = record(teacher.id, "2025-03-04", AttendanceStatus::Present);
        afternoon.check_in = None;
        afternoon.check_out = Some("14:00".to_string());
        let merged = storage.upsert_attendance_impl(afternoon).await.unwrap();

        assert_eq!(merged.check_in.as_deref(), Some("07:30"));
        assert_eq!(merged.check_out.as_deref(), Some("14:00"));
        assert_eq!(merged.notes.as_deref(), Some("bus delay"));
    }

    #[tokio::test]
    async fn test_status_counts_respect_date_range() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-022", "Lina").await;

        for (date, status) in [
            ("2025-03-01", AttendanceStatus::Present),
            ("2025-03-02", AttendanceStatus::Present),
            ("2025-03-03", AttendanceStatus::Absent),
            ("2025-04-01", AttendanceStatus::Late),
        ] {
            storage
                .create_attendance_impl(record(teacher.id, date, status))
                .await
                .unwrap();
        }

        let mut counts = storage
            .count_attendance_by_status_impl(AttendanceListQuery {
                start_date: Some("2025-03-01".to_string()),
                end_date: Some("2025-03-31".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        counts.sort_by_key(|(_, c)| *c);
        assert_eq!(
            counts,
            vec![(AttendanceStatus::Absent, 1), (AttendanceStatus::Present, 2)]
        );
    }
}
