use crate::errors::Result;
use crate::models::attendance::{
    entities::AttendanceStatus,
    requests::{AttendanceListQuery, AttendanceStatsParams},
    responses::AttendanceStats,
};
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;
use crate::utils::validate::normalize_date_range;

/// 出勤率 = (出勤 + 迟到) / 总数 × 100，保留两位小数；无记录时为 0
pub fn attendance_rate(present: i64, late: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let rate = (present + late) as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// 把按状态分组的计数汇总为统计结果
pub fn tally(counts: &[(AttendanceStatus, i64)]) -> AttendanceStats {
    let mut stats = AttendanceStats::default();
    for (status, count) in counts {
        match status {
            AttendanceStatus::Present => stats.present += count,
            AttendanceStatus::Absent => stats.absent += count,
            AttendanceStatus::Late => stats.late += count,
            AttendanceStatus::Excused => stats.excused += count,
        }
        stats.total += count;
    }
    stats.attendance_rate = attendance_rate(stats.present, stats.late, stats.total);
    stats
}

/// 考勤状态统计，作用域与列表相同
pub async fn attendance_stats(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    params: AttendanceStatsParams,
) -> Result<AttendanceStats> {
    let principal = require(principal, Resource::Attendance, Action::Read)?;
    let (start_date, end_date) =
        normalize_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let scope = scope_for(ctx.storage(), principal, Resource::Attendance).await?;

    let Some(teacher_id) = scope.teacher_filter(params.teacher_id).as_query() else {
        return Ok(AttendanceStats::default());
    };

    let counts = ctx
        .storage
        .count_attendance_by_status(AttendanceListQuery {
            teacher_id,
            start_date,
            end_date,
            ..Default::default()
        })
        .await?;
    Ok(tally(&counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::requests::NewAttendance;
    use crate::services::test_support::{context, linked_teacher};
    use crate::storage::sea_orm_storage::test_support::seed_teacher;

    #[test]
    fn test_attendance_rate() {
        assert_eq!(attendance_rate(0, 0, 0), 0.0);
        assert_eq!(attendance_rate(2, 1, 3), 100.0);
        assert_eq!(attendance_rate(1, 0, 3), 33.33);
        assert_eq!(attendance_rate(1, 1, 3), 66.67);
    }

    #[test]
    fn test_tally() {
        let stats = tally(&[
            (AttendanceStatus::Present, 6),
            (AttendanceStatus::Late, 2),
            (AttendanceStatus::Absent, 1),
            (AttendanceStatus::Excused, 1),
        ]);
        assert_eq!(stats.total, 10);
        assert_eq!(stats.attendance_rate, 80.0);
    }

    #[tokio::test]
    async fn test_teacher_stats_are_scoped() {
        let (storage, ctx) = context().await;
        let (own, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;
        let other = seed_teacher(&storage, "T-2", "Other").await;
        for (teacher_id, date, status) in [
            (own.id, "2025-01-01", AttendanceStatus::Present),
            (own.id, "2025-01-02", AttendanceStatus::Absent),
            (other.id, "2025-01-01", AttendanceStatus::Late),
        ] {
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

        let stats = attendance_stats(
            &ctx,
            Some(&principal),
            AttendanceStatsParams {
                teacher_id: Some(other.id),
                start_date: None,
                end_date: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.late, 0);
        assert_eq!(stats.attendance_rate, 50.0);
    }
}
