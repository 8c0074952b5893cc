use serde::Serialize;
use ts_rs::TS;

use super::entities::{ActivityEvaluation, Participation};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct ParticipationListResponse {
    pub items: Vec<Participation>,
    pub pagination: PaginationInfo,
}

// 参与记录当前的评价（可能尚未评价）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participation.ts")]
pub struct ActivityEvaluationResponse {
    pub participation: Participation,
    pub evaluation: Option<ActivityEvaluation>,
}
