//! 教师备注实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub author_id: i64,
    pub note_type: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
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
    pub fn into_note(
        self,
        teacher_name: Option<String>,
        author_name: Option<String>,
    ) -> crate::models::notes::entities::Note {
        use crate::models::notes::entities::{Note, NoteType};
        use chrono::{DateTime, Utc};

        Note {
            id: self.id,
            teacher_id: self.teacher_id,
            teacher_name,
            author_id: self.author_id,
            author_name,
            note_type: self.note_type.parse::<NoteType>().unwrap_or(NoteType::Info),
            content: self.content,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
