use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
    AttendanceStatus("attendance status") {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

// 考勤记录；同一教师同一天至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: Option<String>,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
