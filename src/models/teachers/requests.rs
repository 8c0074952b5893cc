use serde::Deserialize;
use ts_rs::TS;

use super::entities::TeacherStatus;
use crate::models::common::PaginationQuery;

// 教师列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<TeacherStatus>,
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<TeacherStatus>,
    /// 作用域限定的教师 id
    pub teacher_id: Option<i64>,
    /// 是否已开通登录账户
    pub linked: Option<bool>,
}

// 教师创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub employee_id: String,
    pub display_name: String,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<TeacherStatus>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
}

// 教师更新请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub employee_id: Option<String>,
    pub display_name: Option<String>,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<TeacherStatus>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
}
