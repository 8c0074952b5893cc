use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub grade: Option<String>,
    pub parent_id: Option<i64>,
    pub search: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub grade: Option<String>,
    pub parent_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_code: String,
    pub display_name: String,
    pub grade: String,
    pub parent_id: Option<i64>,
}

// 学生更新请求；`clear_parent` 为 true 时解除家长关联
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub student_code: Option<String>,
    pub display_name: Option<String>,
    pub grade: Option<String>,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub clear_parent: bool,
}
