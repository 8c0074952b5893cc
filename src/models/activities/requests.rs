use serde::Deserialize;
use ts_rs::TS;

use super::entities::ActivityStatus;
use crate::models::common::PaginationQuery;

// 活动列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category_id: Option<i64>,
    pub status: Option<ActivityStatus>,
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 活动列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub category_id: Option<i64>,
    pub status: Option<ActivityStatus>,
    pub search: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct CreateActivityRequest {
    pub category_id: i64,
    pub responsible_teacher_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<ActivityStatus>,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct UpdateActivityRequest {
    pub category_id: Option<i64>,
    pub responsible_teacher_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<ActivityStatus>,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct CreateActivityCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}
