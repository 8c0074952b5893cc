use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生档案；家长可以为空
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub student_code: String,
    pub display_name: String,
    pub grade: String,
    pub parent_id: Option<i64>,
    pub parent_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
