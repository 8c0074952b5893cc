//! 部门实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_department(self) -> crate::models::lookups::entities::Department {
        crate::models::lookups::entities::Department {
            id: self.id,
            name: self.name,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(self.created_at, 0)
                .unwrap_or_default(),
        }
    }
}
