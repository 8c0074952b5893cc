use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ParticipationRole, ParticipationStatus};
use crate::models::common::PaginationQuery;

// 参与列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct ParticipationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub activity_id: Option<i64>,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

// 参与列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ParticipationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub activity_id: Option<i64>,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct CreateParticipationRequest {
    pub activity_id: i64,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub role: Option<ParticipationRole>,
    pub status: Option<ParticipationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct UpdateParticipationRequest {
    pub role: Option<ParticipationRole>,
    pub status: Option<ParticipationStatus>,
    pub notes: Option<String>,
}

// 参与者：学生或教职工
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Student(i64),
    Teacher(i64),
}

// 写入参与记录（存储层参数，参与者已确定）
#[derive(Debug, Clone)]
pub struct NewParticipation {
    pub activity_id: i64,
    pub participant: Participant,
    pub role: ParticipationRole,
    pub status: ParticipationStatus,
    pub notes: Option<String>,
}

// 活动表现评价保存请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct SaveActivityEvaluationRequest {
    pub score: i32,
    pub performance: Option<String>,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
}

// 写入活动表现评价（存储层参数）
#[derive(Debug, Clone)]
pub struct NewActivityEvaluation {
    pub participation_id: i64,
    pub evaluator_id: i64,
    pub score: i32,
    pub performance: Option<String>,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
}
