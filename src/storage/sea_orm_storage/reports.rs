//! 报表统计查询

use super::SeaOrmStorage;
use crate::entity::attendance::{Column as AttendanceColumn, Entity as Attendance};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::notes::{Column as NoteColumn, Entity as Notes};
use crate::entity::teachers::{Column, Entity as Teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    attendance::entities::AttendanceStatus, evaluations::entities::Evaluation,
    teachers::entities::Teacher,
};
use crate::storage::{ReportFilter, TeacherStatusCount};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 报表涉及的教师
    pub async fn list_teachers_for_report_impl(&self, filter: &ReportFilter) -> Result<Vec<Teacher>> {
        let mut select = Teachers::find();

        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(Column::Id.eq(teacher_id));
        }
        if let Some(department_id) = filter.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        let models = select
            .order_by_asc(Column::DisplayName)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表教师失败: {e}")))?;

        self.attach_teacher_lookups(models).await
    }

    /// 每位教师的考勤状态计数
    pub async fn count_attendance_by_teacher_impl(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<TeacherStatusCount>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select = Attendance::find()
            .select_only()
            .column(AttendanceColumn::TeacherId)
            .column(AttendanceColumn::Status)
            .column_as(AttendanceColumn::Id.count(), "count")
            .filter(AttendanceColumn::TeacherId.is_in(teacher_ids.to_vec()));

        if let Some(ref start) = filter.start_date {
            select = select.filter(AttendanceColumn::Date.gte(start.as_str()));
        }
        if let Some(ref end) = filter.end_date {
            select = select.filter(AttendanceColumn::Date.lte(end.as_str()));
        }

        let rows: Vec<(i64, String, i64)> = select
            .group_by(AttendanceColumn::TeacherId)
            .group_by(AttendanceColumn::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(teacher_id, status, count)| {
                status
                    .parse::<AttendanceStatus>()
                    .ok()
                    .map(|status| TeacherStatusCount {
                        teacher_id,
                        status,
                        count,
                    })
            })
            .collect())
    }

    /// 时间范围内这些教师的评估
    pub async fn list_evaluations_for_teachers_impl(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<Evaluation>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select =
            Evaluations::find().filter(EvaluationColumn::TeacherId.is_in(teacher_ids.to_vec()));

        if let Some(ref start) = filter.start_date {
            select = select.filter(EvaluationColumn::Date.gte(start.as_str()));
        }
        if let Some(ref end) = filter.end_date {
            select = select.filter(EvaluationColumn::Date.lte(end.as_str()));
        }

        let models = select
            .order_by_asc(EvaluationColumn::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评估失败: {e}")))?;

        self.attach_evaluation_names(models).await
    }

    /// 每位教师的备注数
    pub async fn count_notes_by_teacher_impl(&self, teacher_ids: &[i64]) -> Result<Vec<(i64, i64)>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        Notes::find()
            .select_only()
            .column(NoteColumn::TeacherId)
            .column_as(NoteColumn::Id.count(), "count")
            .filter(NoteColumn::TeacherId.is_in(teacher_ids.to_vec()))
            .group_by(NoteColumn::TeacherId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计备注失败: {e}")))
    }
}
