//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_code: String,
    pub display_name: String,
    pub grade: String,
    pub parent_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parent_accounts::Entity",
        from = "Column::ParentId",
        to = "super::parent_accounts::Column::Id"
    )]
    ParentAccounts,
}

impl Related<super::parent_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(
        self,
        parent_name: Option<String>,
    ) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            student_code: self.student_code,
            display_name: self.display_name,
            grade: self.grade,
            parent_id: self.parent_id,
            parent_name,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
