//! 活动表现评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub participation_id: i64,
    pub evaluator_id: i64,
    pub score: i32,
    pub performance: Option<String>,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::participations::Entity",
        from = "Column::ParticipationId",
        to = "super::participations::Column::Id"
    )]
    Participations,
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity_evaluation(
        self,
        evaluator_name: Option<String>,
    ) -> crate::models::participations::entities::ActivityEvaluation {
        use crate::models::participations::entities::ActivityEvaluation;
        use chrono::{DateTime, Utc};

        ActivityEvaluation {
            id: self.id,
            participation_id: self.participation_id,
            evaluator_id: self.evaluator_id,
            evaluator_name,
            score: self.score,
            performance: self.performance,
            strengths: self.strengths,
            improvements: self.improvements,
            comments: self.comments,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
