//! 活动参与实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "participations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub role: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activities::Entity",
        from = "Column::ActivityId",
        to = "super::activities::Column::Id"
    )]
    Activities,
    #[sea_orm(has_many = "super::activity_evaluations::Entity")]
    ActivityEvaluations,
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl Related<super::activity_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 参与记录的显示名称
#[derive(Debug, Clone, Default)]
pub struct ParticipationNames {
    pub activity_title: Option<String>,
    pub student_name: Option<String>,
    pub teacher_name: Option<String>,
}

impl Model {
    pub fn into_participation(
        self,
        names: ParticipationNames,
    ) -> crate::models::participations::entities::Participation {
        use crate::models::participations::entities::{
            Participation, ParticipationRole, ParticipationStatus,
        };
        use chrono::{DateTime, Utc};

        Participation {
            id: self.id,
            activity_id: self.activity_id,
            activity_title: names.activity_title,
            student_id: self.student_id,
            student_name: names.student_name,
            teacher_id: self.teacher_id,
            teacher_name: names.teacher_name,
            role: self
                .role
                .parse::<ParticipationRole>()
                .unwrap_or(ParticipationRole::Participant),
            status: self
                .status
                .parse::<ParticipationStatus>()
                .unwrap_or(ParticipationStatus::Registered),
            notes: self.notes,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
