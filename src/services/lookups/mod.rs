//! 部门与学科

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::lookups::{
    entities::{Department, Subject},
    requests::CreateLookupRequest,
};
use crate::policy::{Action, Resource, require};
use crate::services::{ServiceContext, resolve_context};
use crate::utils::validate::require_text;

pub async fn list_departments(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<Vec<Department>> {
    require(principal, Resource::Department, Action::Read)?;
    ctx.storage.list_departments().await
}

pub async fn create_department(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateLookupRequest,
) -> Result<Department> {
    let principal = require(principal, Resource::Department, Action::Create)?;
    require_text("name", &req.name)?;
    let department = ctx.storage.create_department(req.name.trim()).await?;
    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Department,
            Some(department.id),
            Some(serde_json::json!({ "name": department.name })),
        )
        .await;
    Ok(department)
}

pub async fn list_subjects(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
) -> Result<Vec<Subject>> {
    require(principal, Resource::Subject, Action::Read)?;
    ctx.storage.list_subjects().await
}

pub async fn create_subject(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateLookupRequest,
) -> Result<Subject> {
    let principal = require(principal, Resource::Subject, Action::Create)?;
    require_text("name", &req.name)?;
    let subject = ctx.storage.create_subject(req.name.trim()).await?;
    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Subject,
            Some(subject.id),
            Some(serde_json::json!({ "name": subject.name })),
        )
        .await;
    Ok(subject)
}

pub struct LookupService {
    context: Option<ServiceContext>,
}

impl LookupService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_departments(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list_departments(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Departments retrieved successfully",
        )))
    }

    pub async fn create_department(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateLookupRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = create_department(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            data,
            "Department created successfully",
        )))
    }

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list_subjects(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Subjects retrieved successfully",
        )))
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateLookupRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = create_subject(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            data,
            "Subject created successfully",
        )))
    }
}
