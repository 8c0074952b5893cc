//! 家长门户：家长只能看到自己的子女及其活动记录

pub mod children;
pub mod overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::services::{ServiceContext, resolve_context};

pub struct ParentPortalService {
    context: Option<ServiceContext>,
}

impl ParentPortalService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_children(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = children::list_children(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Children retrieved successfully",
        )))
    }

    pub async fn child_overview(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = overview::child_overview(&ctx, principal, student_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Child overview retrieved successfully",
        )))
    }
}
