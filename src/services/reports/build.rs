use std::collections::HashMap;

use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::evaluations::entities::Evaluation;
use crate::models::reports::{
    entities::{ReportCell, ReportType},
    requests::ReportParams,
    responses::ReportData,
};
use crate::models::teachers::entities::Teacher;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::services::attendance::stats::tally;
use crate::services::evaluations::score::average_scores;
use crate::storage::{ReportFilter, TeacherStatusCount};
use crate::utils::validate::normalize_date_range;

fn identity_cells(teacher: &Teacher) -> Vec<ReportCell> {
    vec![
        teacher.display_name.as_str().into(),
        teacher.employee_id.as_str().into(),
        teacher.department_name.clone().unwrap_or_default().into(),
    ]
}

fn group_counts(counts: &[TeacherStatusCount]) -> HashMap<i64, Vec<(AttendanceStatus, i64)>> {
    let mut grouped: HashMap<i64, Vec<(AttendanceStatus, i64)>> = HashMap::new();
    for row in counts {
        grouped
            .entry(row.teacher_id)
            .or_default()
            .push((row.status, row.count));
    }
    grouped
}

fn group_evaluations(evaluations: Vec<Evaluation>) -> HashMap<i64, Vec<Evaluation>> {
    let mut grouped: HashMap<i64, Vec<Evaluation>> = HashMap::new();
    for evaluation in evaluations {
        grouped
            .entry(evaluation.teacher_id)
            .or_default()
            .push(evaluation);
    }
    grouped
}

/// 考勤报表：各状态天数与出勤率
pub fn attendance_rows(
    teachers: &[Teacher],
    counts: &[TeacherStatusCount],
) -> Vec<Vec<ReportCell>> {
    let grouped = group_counts(counts);
    teachers
        .iter()
        .map(|teacher| {
            let stats = tally(
                grouped
                    .get(&teacher.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            );
            let mut row = identity_cells(teacher);
            row.extend([
                ReportCell::from(stats.present),
                ReportCell::from(stats.absent),
                ReportCell::from(stats.late),
                ReportCell::from(stats.excused),
                ReportCell::from(stats.attendance_rate),
            ]);
            row
        })
        .collect()
}

/// 评估报表：评估次数与各项平均分
pub fn evaluation_rows(
    teachers: &[Teacher],
    evaluations: Vec<Evaluation>,
) -> Vec<Vec<ReportCell>> {
    let grouped = group_evaluations(evaluations);
    teachers
        .iter()
        .map(|teacher| {
            let averages = average_scores(
                grouped
                    .get(&teacher.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            );
            let mut row = identity_cells(teacher);
            row.extend([
                ReportCell::from(averages.count as i64),
                ReportCell::from(averages.teaching_quality),
                ReportCell::from(averages.punctuality),
                ReportCell::from(averages.student_interaction),
                ReportCell::from(averages.curriculum_adherence),
                ReportCell::from(averages.overall),
            ]);
            row
        })
        .collect()
}

/// 综合报表：学科、出勤率、平均总分与备注数
pub fn summary_rows(
    teachers: &[Teacher],
    counts: &[TeacherStatusCount],
    evaluations: Vec<Evaluation>,
    notes: &[(i64, i64)],
) -> Vec<Vec<ReportCell>> {
    let grouped_counts = group_counts(counts);
    let grouped_evaluations = group_evaluations(evaluations);
    let notes: HashMap<i64, i64> = notes.iter().copied().collect();

    teachers
        .iter()
        .map(|teacher| {
            let stats = tally(
                grouped_counts
                    .get(&teacher.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            );
            let averages = average_scores(
                grouped_evaluations
                    .get(&teacher.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            );
            let mut row = identity_cells(teacher);
            row.extend([
                ReportCell::from(teacher.subject_name.clone().unwrap_or_default()),
                ReportCell::from(stats.attendance_rate),
                ReportCell::from(averages.overall),
                ReportCell::from(notes.get(&teacher.id).copied().unwrap_or(0)),
            ]);
            row
        })
        .collect()
}

/// 生成报表并记录一次导出
pub async fn build_report(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    report_type: ReportType,
    params: ReportParams,
) -> Result<ReportData> {
    let principal = require(principal, Resource::Report, Action::Read)?;
    let (start_date, end_date) =
        normalize_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;

    let filter = ReportFilter {
        teacher_id: params.teacher_id,
        department_id: params.department_id,
        start_date,
        end_date,
        limit: AppConfig::get().export.max_rows,
    };
    let teachers = ctx.storage.list_teachers_for_report(&filter).await?;
    let ids: Vec<i64> = teachers.iter().map(|t| t.id).collect();

    let rows = match report_type {
        ReportType::Attendance => {
            let counts = ctx.storage.count_attendance_by_teacher(&ids, &filter).await?;
            attendance_rows(&teachers, &counts)
        }
        ReportType::Evaluations => {
            let evaluations = ctx
                .storage
                .list_evaluations_for_teachers(&ids, &filter)
                .await?;
            evaluation_rows(&teachers, evaluations)
        }
        ReportType::Summary => {
            let counts = ctx.storage.count_attendance_by_teacher(&ids, &filter).await?;
            let evaluations = ctx
                .storage
                .list_evaluations_for_teachers(&ids, &filter)
                .await?;
            let notes = ctx.storage.count_notes_by_teacher(&ids).await?;
            summary_rows(&teachers, &counts, evaluations, &notes)
        }
    };
    info!("生成 {} 报表，共 {} 行", report_type, rows.len());

    let format = params.format.map(|f| f.to_string());
    ctx.audit
        .record(
            Some(principal),
            AuditAction::Export,
            Resource::Report,
            None,
            Some(serde_json::json!({
                "report_type": report_type,
                "format": format.as_deref().unwrap_or("json"),
                "rows": rows.len(),
            })),
        )
        .await;

    Ok(ReportData {
        report_type,
        title: report_type.title().to_string(),
        generated_at: chrono::Utc::now(),
        start_date: filter.start_date,
        end_date: filter.end_date,
        headers: report_type.headers().iter().map(|h| h.to_string()).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::requests::NewAttendance;
    use crate::models::auth::entities::Role;
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    fn params() -> ReportParams {
        ReportParams {
            format: None,
            start_date: None,
            end_date: None,
            teacher_id: None,
            department_id: None,
        }
    }

    async fn mark(ctx: &ServiceContext, teacher_id: i64, date: &str, status: AttendanceStatus) {
        ctx.storage
            .create_attendance(NewAttendance {
                teacher_id,
                date: date.to_string(),
                check_in: None,
                check_out: None,
                status,
                notes: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_attendance_report_rows() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let amal = seed_teacher(&storage, "T-1", "Amal").await;
        let badr = seed_teacher(&storage, "T-2", "Badr").await;
        mark(&ctx, amal.id, "2025-03-01", AttendanceStatus::Present).await;
        mark(&ctx, amal.id, "2025-03-02", AttendanceStatus::Late).await;
        mark(&ctx, amal.id, "2025-03-03", AttendanceStatus::Absent).await;
        mark(&ctx, amal.id, "2025-04-01", AttendanceStatus::Absent).await;

        let report = build_report(
            &ctx,
            Some(&manager),
            ReportType::Attendance,
            ReportParams {
                start_date: Some("2025-03-01".to_string()),
                end_date: Some("2025-03-31".to_string()),
                ..params()
            },
        )
        .await
        .unwrap();

        assert_eq!(report.headers.len(), ReportType::Attendance.headers().len());
        assert_eq!(report.rows.len(), 2);
        // 按姓名排序
        let amal_row = &report.rows[0];
        assert_eq!(amal_row[0], ReportCell::Text("Amal".to_string()));
        assert_eq!(amal_row[3], ReportCell::Integer(1));
        assert_eq!(amal_row[4], ReportCell::Integer(1));
        assert_eq!(amal_row[5], ReportCell::Integer(1));
        assert_eq!(amal_row[7], ReportCell::Decimal(66.67));
        let badr_row = &report.rows[1];
        assert_eq!(badr_row[1], ReportCell::Text(badr.employee_id.clone()));
        assert_eq!(badr_row[7], ReportCell::Decimal(0.0));
    }

    #[tokio::test]
    async fn test_report_requires_management() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        assert_eq!(
            build_report(&ctx, Some(&teacher), ReportType::Summary, params())
                .await
                .unwrap_err()
                .code(),
            "E003"
        );
    }

    #[test]
    fn test_summary_rows_without_data() {
        let teacher = Teacher {
            id: 7,
            employee_id: "T-7".to_string(),
            display_name: "Salma".to_string(),
            department_id: None,
            department_name: Some("Science".to_string()),
            subject_id: None,
            subject_name: Some("Physics".to_string()),
            status: crate::models::teachers::entities::TeacherStatus::Active,
            email: None,
            phone: None,
            hire_date: None,
            linked_account_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let rows = summary_rows(&[teacher], &[], Vec::new(), &[(7, 3)]);
        assert_eq!(
            rows[0],
            vec![
                ReportCell::Text("Salma".to_string()),
                ReportCell::Text("T-7".to_string()),
                ReportCell::Text("Science".to_string()),
                ReportCell::Text("Physics".to_string()),
                ReportCell::Decimal(0.0),
                ReportCell::Decimal(0.0),
                ReportCell::Integer(3),
            ]
        );
    }
}
