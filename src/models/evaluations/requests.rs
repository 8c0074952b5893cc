use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EvaluationNotes, EvaluationScores};
use crate::models::common::PaginationQuery;

// 评估列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 评估列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct EvaluationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 评估创建请求
//
// 各项评分接受整数或数字字符串；缺省或无法解析时按 7 分处理。
// 总分由服务端计算，客户端无法指定。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub teacher_id: i64,
    pub date: Option<String>,
    #[ts(type = "number | string | null")]
    pub teaching_quality: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub punctuality: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub student_interaction: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub curriculum_adherence: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub lesson_planning: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub lesson_execution: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub classroom_management: Option<serde_json::Value>,
    #[ts(type = "number | string | null")]
    pub professional_growth: Option<serde_json::Value>,
    pub lesson_planning_note: Option<String>,
    pub lesson_execution_note: Option<String>,
    pub classroom_management_note: Option<String>,
    pub professional_growth_note: Option<String>,
    pub comments: Option<String>,
}

// 写入评估（存储层参数）
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub teacher_id: i64,
    pub evaluator_id: i64,
    pub date: String,
    pub scores: EvaluationScores,
    pub notes: EvaluationNotes,
    pub overall_score: f64,
    pub comments: Option<String>,
}
