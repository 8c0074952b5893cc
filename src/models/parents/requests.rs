use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ParentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 家长列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ParentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct CreateParentRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct UpdateParentRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

// 新建家长账户（存储层参数，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewParentAccount {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
}

// 家长账户更新（存储层参数）
#[derive(Debug, Clone, Default)]
pub struct ParentAccountUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}
