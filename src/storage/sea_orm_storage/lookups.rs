//! 部门与学科存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::departments::{
    ActiveModel as DepartmentActiveModel, Column as DepartmentColumn, Entity as Departments,
};
use crate::entity::subjects::{
    ActiveModel as SubjectActiveModel, Column as SubjectColumn, Entity as Subjects,
};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::lookups::entities::{Department, Subject};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let models = Departments::find()
            .order_by_asc(DepartmentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询部门列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_department()).collect())
    }

    pub async fn create_department_impl(&self, name: &str) -> Result<Department> {
        let model = DepartmentActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Department"))?;

        Ok(result.into_department())
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let models = Subjects::find()
            .order_by_asc(SubjectColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学科列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn create_subject_impl(&self, name: &str) -> Result<Subject> {
        let model = SubjectActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("Subject"))?;

        Ok(result.into_subject())
    }

    /// 批量查询部门名称
    pub(crate) async fn department_names_impl(
        &self,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Departments::find()
            .select_only()
            .column(DepartmentColumn::Id)
            .column(DepartmentColumn::Name)
            .filter(DepartmentColumn::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询部门失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 批量查询学科名称
    pub(crate) async fn subject_names_impl(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Subjects::find()
            .select_only()
            .column(SubjectColumn::Id)
            .column(SubjectColumn::Name)
            .filter(SubjectColumn::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_department_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_department_impl("Math").await.unwrap();
        let err = storage.create_department_impl("Math").await.unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));

        storage.create_subject_impl("Physics").await.unwrap();
        storage.create_subject_impl("Art").await.unwrap();
        let subjects = storage.list_subjects_impl().await.unwrap();
        assert_eq!(subjects[0].name, "Art");
    }
}
