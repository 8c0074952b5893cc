use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
    ParticipationRole("participation role") {
        Participant => "participant",
        Organizer => "organizer",
        Presenter => "presenter",
        Judge => "judge",
    }
}

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
    ParticipationStatus("participation status") {
        Registered => "registered",
        Attended => "attended",
        Completed => "completed",
        Absent => "absent",
    }
}

// 活动参与记录：学生与教职工恰好其一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct Participation {
    pub id: i64,
    pub activity_id: i64,
    pub activity_title: Option<String>,
    pub student_id: Option<i64>,
    pub student_name: Option<String>,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub role: ParticipationRole,
    pub status: ParticipationStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 活动表现评价
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct ActivityEvaluation {
    pub id: i64,
    pub participation_id: i64,
    pub evaluator_id: i64,
    pub evaluator_name: Option<String>,
    pub score: i32,
    pub performance: Option<String>,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
