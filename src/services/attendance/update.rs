use crate::errors::{Result, SchoolError};
use crate::models::attendance::{entities::AttendanceRecord, requests::UpdateAttendanceRequest};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::normalize_time;

use super::get::NOT_FOUND;

pub async fn update_attendance(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    mut req: UpdateAttendanceRequest,
) -> Result<AttendanceRecord> {
    let principal = require(principal, Resource::Attendance, Action::Update)?;

    req.check_in = normalize_time("check_in", req.check_in.as_deref())?;
    req.check_out = normalize_time("check_out", req.check_out.as_deref())?;

    let record = ctx
        .storage
        .update_attendance(id, req)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Attendance,
            Some(id),
            Some(serde_json::json!({ "status": record.status })),
        )
        .await;

    Ok(record)
}
