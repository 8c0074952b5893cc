use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;

// 考勤列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 考勤统计查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatsParams {
    pub teacher_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 考勤列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 考勤创建请求
//
// `self_register` 为 true 时由教师本人签到，教师与日期由服务端决定。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub teacher_id: Option<i64>,
    pub date: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub self_register: bool,
}

// 考勤更新请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

// 写入考勤（存储层参数，字段已校验）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub teacher_id: i64,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}
