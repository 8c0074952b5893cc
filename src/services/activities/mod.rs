pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::activities::requests::{
    ActivityListParams, CreateActivityRequest, UpdateActivityRequest,
};
use crate::models::auth::entities::Principal;
use crate::services::{ServiceContext, resolve_context};

pub struct ActivityService {
    context: Option<ServiceContext>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_activities(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: ActivityListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_activities(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Activities retrieved successfully",
        )))
    }

    pub async fn get_activity(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let activity = get::get_activity(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            activity,
            "Activity retrieved successfully",
        )))
    }

    pub async fn create_activity(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateActivityRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let activity = create::create_activity(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            activity,
            "Activity created successfully",
        )))
    }

    pub async fn update_activity(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateActivityRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let activity = update::update_activity(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            activity,
            "Activity updated successfully",
        )))
    }

    // 同时删除参与记录与活动评价
    pub async fn delete_activity(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        delete::delete_activity(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Activity deleted successfully")))
    }
}
