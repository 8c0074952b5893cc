use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::teachers::{entities::Teacher, requests::UpdateTeacherRequest};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::{normalize_date, normalize_email, require_text};

pub async fn update_teacher(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    mut req: UpdateTeacherRequest,
) -> Result<Teacher> {
    let principal = require(principal, Resource::Teacher, Action::Update)?;

    if let Some(employee_id) = &req.employee_id {
        require_text("employee_id", employee_id)?;
    }
    if let Some(name) = &req.display_name {
        require_text("display_name", name)?;
    }
    req.email = req.email.as_deref().map(normalize_email).transpose()?;
    req.hire_date = normalize_date("hire_date", req.hire_date.as_deref())?;

    let teacher = ctx
        .storage
        .update_teacher(id, req)
        .await?
        .ok_or_else(|| SchoolError::not_found("Teacher not found"))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Teacher,
            Some(id),
            None,
        )
        .await;

    Ok(teacher)
}
