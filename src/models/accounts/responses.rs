use serde::Serialize;
use ts_rs::TS;

use super::entities::StaffAccount;
use crate::models::common::PaginationInfo;
use crate::models::teachers::entities::Teacher;

// 教师及其登录账户开通状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct TeacherAccountView {
    pub teacher: Teacher,
    pub account: Option<StaffAccount>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct TeacherAccountListResponse {
    pub items: Vec<TeacherAccountView>,
    pub pagination: PaginationInfo,
}
