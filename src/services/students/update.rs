use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::students::{entities::Student, requests::UpdateStudentRequest};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::require_text;

pub async fn update_student(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
    mut req: UpdateStudentRequest,
) -> Result<Student> {
    let principal = require(principal, Resource::Student, Action::Update)?;

    for (field, value) in [
        ("student_code", &req.student_code),
        ("display_name", &req.display_name),
        ("grade", &req.grade),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }
    if req.clear_parent && req.parent_id.is_some() {
        return Err(SchoolError::invalid_input(
            "parent_id cannot be set while clear_parent is true",
        ));
    }
    req.student_code = req.student_code.map(|v| v.trim().to_string());
    req.display_name = req.display_name.map(|v| v.trim().to_string());
    req.grade = req.grade.map(|v| v.trim().to_string());

    let student = ctx
        .storage
        .update_student(id, req)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Update,
            Resource::Student,
            Some(id),
            Some(serde_json::json!({ "parent_id": student.parent_id })),
        )
        .await;

    Ok(student)
}
