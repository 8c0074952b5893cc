use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    /// 主体角色
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
    Role("role") {
        Admin => "admin",
        Manager => "manager",
        Teacher => "teacher",
        Parent => "parent",
    }
}

/// 已认证的请求主体
///
/// 由会话解析得到，在一次请求内不可变。教职工与家长的 id 来自不同的表，
/// 需结合 `role` 区分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct Principal {
    pub id: i64,
    pub display_name: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: i64, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }
}
