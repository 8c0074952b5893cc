use super::create::check_capacity;
use crate::errors::{Result, SchoolError};
use crate::models::activities::{entities::Activity, requests::UpdateActivityRequest};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::{normalize_date, normalize_time, require_text};

pub async fn update_activity(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    mut req: UpdateActivityRequest,
) -> Result<Activity> {
    let principal = require(principal, Resource::Activity, Action::Update)?;

    if let Some(title) = &req.title {
        require_text("title", title)?;
    }
    req.title = req.title.map(|t| t.trim().to_string());
    req.date = normalize_date("date", req.date.as_deref())?;
    req.end_date = normalize_date("end_date", req.end_date.as_deref())?;
    req.time = normalize_time("time", req.time.as_deref())?;
    check_capacity(req.max_participants)?;

    let activity = ctx
        .storage
        .update_activity(id, req)
        .await?
        .ok_or_else(|| SchoolError::not_found("Activity not found"))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Activity,
            Some(id),
            Some(serde_json::json!({ "status": activity.status })),
        )
        .await;

    Ok(activity)
}
