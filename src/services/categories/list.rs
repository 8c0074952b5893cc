use crate::errors::Result;
use crate::models::activities::entities::ActivityCategory;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, check};
use crate::services::ServiceContext;

pub async fn list_categories(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<Vec<ActivityCategory>> {
    check(principal, Resource::ActivityCategory, Action::Read)?;
    ctx.storage.list_activity_categories().await
}
