use serde::Serialize;
use ts_rs::TS;

use super::entities::Principal;

// 登录响应；令牌只通过 Cookie 下发
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub user: Principal,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct CurrentUserResponse {
    pub user: Principal,
}
