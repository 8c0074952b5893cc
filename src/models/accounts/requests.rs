use serde::Deserialize;
use ts_rs::TS;

use crate::models::auth::entities::Role;
use crate::models::common::PaginationQuery;

// 新建教职工账户（存储层参数，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewStaffAccount {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
}

// 教职工账户更新（存储层参数）
#[derive(Debug, Clone, Default)]
pub struct StaffAccountUpdate {
    pub password_hash: Option<String>,
    pub active: Option<bool>,
    pub display_name: Option<String>,
}

// 教师账户列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct TeacherAccountListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    /// true 只看已开通，false 只看未开通
    pub linked: Option<bool>,
}

// 为教师开通登录账户
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct GrantTeacherAccountRequest {
    pub teacher_id: i64,
    pub email: String,
    pub password: String,
}

// 教师账户更新请求：重置密码或启停用
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct UpdateTeacherAccountRequest {
    pub password: Option<String>,
    pub active: Option<bool>,
}
