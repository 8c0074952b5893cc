use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 八项评分：前四项为旧版量表，后四项为细化量表
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationScores {
    pub teaching_quality: i32,
    pub punctuality: i32,
    pub student_interaction: i32,
    pub curriculum_adherence: i32,
    pub lesson_planning: i32,
    pub lesson_execution: i32,
    pub classroom_management: i32,
    pub professional_growth: i32,
}

// 细化量表的文字说明
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationNotes {
    pub lesson_planning_note: Option<String>,
    pub lesson_execution_note: Option<String>,
    pub classroom_management_note: Option<String>,
    pub professional_growth_note: Option<String>,
}

// 教师评估记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: Option<String>,
    pub evaluator_id: i64,
    pub evaluator_name: Option<String>,
    pub date: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub scores: EvaluationScores,
    #[serde(flatten)]
    #[ts(flatten)]
    pub notes: EvaluationNotes,
    pub overall_score: f64,
    pub comments: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
