pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::parents::requests::{
    CreateParentRequest, ParentListParams, UpdateParentRequest,
};
use crate::services::{ServiceContext, resolve_context};

pub(crate) const NOT_FOUND: &str = "Parent not found";

/// 家长账户管理，仅限管理层
pub struct ParentService {
    context: Option<ServiceContext>,
}

impl ParentService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_parents(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: ParentListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_parents(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Parents retrieved successfully",
        )))
    }

    pub async fn get_parent(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = get::get_parent(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Parent retrieved successfully",
        )))
    }

    pub async fn create_parent(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateParentRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let parent = create::create_parent(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            parent,
            "Parent created successfully",
        )))
    }

    pub async fn update_parent(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateParentRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let parent = update::update_parent(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            parent,
            "Parent updated successfully",
        )))
    }

    pub async fn delete_parent(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        delete::delete_parent(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Parent deleted successfully")))
    }
}
