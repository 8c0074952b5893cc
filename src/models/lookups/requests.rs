use serde::Deserialize;
use ts_rs::TS;

// 部门或学科的创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lookup.ts")]
pub struct CreateLookupRequest {
    pub name: String,
}
