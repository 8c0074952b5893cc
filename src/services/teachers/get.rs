use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::teachers::entities::Teacher;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn get_teacher(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<Teacher> {
    let principal = require(principal, Resource::Teacher, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Teacher).await?;

    // 越界与不存在返回同样的结果
    match ctx.storage.get_teacher_by_id(id).await? {
        Some(teacher) if scope.permits_teacher(teacher.id) => Ok(teacher),
        _ => Err(SchoolError::not_found("Teacher not found")),
    }
}
