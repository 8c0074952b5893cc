use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::participations::entities::Participation;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub(crate) const NOT_FOUND: &str = "Participation not found";

pub async fn get_participation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<Participation> {
    require(principal, Resource::Participation, Action::Read)?;
    ctx.storage
        .get_participation_by_id(id)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))
}
