use serde::Serialize;
use ts_rs::TS;

use crate::models::accounts::entities::ParentAccount;
use crate::models::activities::entities::Activity;
use crate::models::common::PaginationInfo;
use crate::models::participations::entities::{ActivityEvaluation, Participation};
use crate::models::students::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ParentListResponse {
    pub items: Vec<ParentAccount>,
    pub pagination: PaginationInfo,
}

// 家长详情（含子女）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ParentDetailResponse {
    pub parent: ParentAccount,
    pub children: Vec<Student>,
}

// 家长门户：子女的一条活动参与及其评价
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildParticipation {
    pub participation: Participation,
    pub activity: Option<Activity>,
    pub evaluations: Vec<ActivityEvaluation>,
}

// 家长门户：子女概览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildOverviewResponse {
    pub student: Student,
    pub participations: Vec<ChildParticipation>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildrenResponse {
    pub items: Vec<Student>,
}
