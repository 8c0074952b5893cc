//! 活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub responsible_teacher_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub max_participants: Option<i32>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity_categories::Entity",
        from = "Column::CategoryId",
        to = "super::activity_categories::Column::Id"
    )]
    ActivityCategories,
    #[sea_orm(has_many = "super::participations::Entity")]
    Participations,
}

impl Related<super::activity_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityCategories.def()
    }
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 活动关联数据，由存储层批量查询后填充
#[derive(Debug, Clone, Default)]
pub struct ActivityExtras {
    pub category_name: Option<String>,
    pub responsible_teacher_name: Option<String>,
    pub participant_count: i64,
}

impl Model {
    pub fn into_activity(
        self,
        extras: ActivityExtras,
    ) -> crate::models::activities::entities::Activity {
        use crate::models::activities::entities::{Activity, ActivityStatus};
        use chrono::{DateTime, Utc};

        Activity {
            id: self.id,
            category_id: self.category_id,
            category_name: extras.category_name,
            responsible_teacher_id: self.responsible_teacher_id,
            responsible_teacher_name: extras.responsible_teacher_name,
            title: self.title,
            description: self.description,
            date: self.date,
            end_date: self.end_date,
            time: self.time,
            location: self.location,
            status: self
                .status
                .parse::<ActivityStatus>()
                .unwrap_or(ActivityStatus::Upcoming),
            max_participants: self.max_participants,
            participant_count: extras.participant_count,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
