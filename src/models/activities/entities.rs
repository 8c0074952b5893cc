use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
    ActivityStatus("activity status") {
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

// 活动分类
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct Activity {
    pub id: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub responsible_teacher_id: Option<i64>,
    pub responsible_teacher_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: ActivityStatus,
    pub max_participants: Option<i32>,
    pub participant_count: i64,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
