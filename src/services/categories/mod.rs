pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::activities::requests::CreateActivityCategoryRequest;
use crate::models::auth::entities::Principal;
use crate::services::{ServiceContext, resolve_context};

/// 活动分类；列表公开，创建仅限管理层
pub struct CategoryService {
    context: Option<ServiceContext>,
}

impl CategoryService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_categories(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let categories = list::list_categories(&ctx, principal).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            categories,
            "Activity categories retrieved successfully",
        )))
    }

    pub async fn create_category(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateActivityCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let category = create::create_category(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            category,
            "Activity category created successfully",
        )))
    }
}
