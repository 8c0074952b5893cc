use crate::errors::{Result, SchoolError};
use crate::models::activities::entities::Activity;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn get_activity(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<Activity> {
    require(principal, Resource::Activity, Action::Read)?;
    ctx.storage
        .get_activity_by_id(id)
        .await?
        .ok_or_else(|| SchoolError::not_found("Activity not found"))
}
