//! 教师评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub evaluator_id: i64,
    pub date: String,
    pub teaching_quality: i32,
    pub punctuality: i32,
    pub student_interaction: i32,
    pub curriculum_adherence: i32,
    pub lesson_planning: i32,
    pub lesson_planning_note: Option<String>,
    pub lesson_execution: i32,
    pub lesson_execution_note: Option<String>,
    pub classroom_management: i32,
    pub classroom_management_note: Option<String>,
    pub professional_growth: i32,
    pub professional_growth_note: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub overall_score: f64,
    pub comments: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teachers,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation(
        self,
        teacher_name: Option<String>,
        evaluator_name: Option<String>,
    ) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{Evaluation, EvaluationNotes, EvaluationScores};
        use chrono::{DateTime, Utc};

        Evaluation {
            id: self.id,
            teacher_id: self.teacher_id,
            teacher_name,
            evaluator_id: self.evaluator_id,
            evaluator_name,
            date: self.date,
            scores: EvaluationScores {
                teaching_quality: self.teaching_quality,
                punctuality: self.punctuality,
                student_interaction: self.student_interaction,
                curriculum_adherence: self.curriculum_adherence,
                lesson_planning: self.lesson_planning,
                lesson_execution: self.lesson_execution,
                classroom_management: self.classroom_management,
                professional_growth: self.professional_growth,
            },
            notes: EvaluationNotes {
                lesson_planning_note: self.lesson_planning_note,
                lesson_execution_note: self.lesson_execution_note,
                classroom_management_note: self.classroom_management_note,
                professional_growth_note: self.professional_growth_note,
            },
            overall_score: self.overall_score,
            comments: self.comments,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
