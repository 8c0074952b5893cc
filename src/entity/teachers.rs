//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub display_name: String,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
    #[sea_orm(unique)]
    pub linked_account_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::notes::Entity")]
    Notes,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::notes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，部门与学科名称由调用方查询后传入
    pub fn into_teacher(
        self,
        department_name: Option<String>,
        subject_name: Option<String>,
    ) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::{Teacher, TeacherStatus};
        use chrono::{DateTime, Utc};

        Teacher {
            id: self.id,
            employee_id: self.employee_id,
            display_name: self.display_name,
            department_id: self.department_id,
            department_name,
            subject_id: self.subject_id,
            subject_name,
            status: self
                .status
                .parse::<TeacherStatus>()
                .unwrap_or(TeacherStatus::Active),
            email: self.email,
            phone: self.phone,
            hire_date: self.hire_date,
            linked_account_id: self.linked_account_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
