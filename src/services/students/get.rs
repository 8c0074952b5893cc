use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::students::entities::Student;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn get_student(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<Student> {
    require(principal, Resource::Student, Action::Read)?;
    ctx.storage
        .get_student_by_id(id)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))
}
