use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::evaluations::entities::Evaluation;
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;

pub async fn get_evaluation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<Evaluation> {
    let principal = require(principal, Resource::Evaluation, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::Evaluation).await?;

    match ctx.storage.get_evaluation_by_id(id).await? {
        Some(evaluation) if scope.permits_teacher(evaluation.teacher_id) => Ok(evaluation),
        _ => Err(SchoolError::not_found("Evaluation not found")),
    }
}
