use serde::Serialize;
use ts_rs::TS;

use super::entities::Activity;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListResponse {
    pub items: Vec<Activity>,
    pub pagination: PaginationInfo,
}
