pub mod grant;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::accounts::requests::{
    GrantTeacherAccountRequest, TeacherAccountListParams, UpdateTeacherAccountRequest,
};
use crate::models::auth::entities::Principal;
use crate::services::{ServiceContext, resolve_context};

/// 教师登录账户管理，仅管理员可用
pub struct TeacherAccountService {
    context: Option<ServiceContext>,
}

impl TeacherAccountService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_accounts(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: TeacherAccountListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_teacher_accounts(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Teacher accounts retrieved successfully",
        )))
    }

    pub async fn grant_account(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: GrantTeacherAccountRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let view = grant::grant_teacher_account(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            view,
            "Teacher account created successfully",
        )))
    }

    // 按教师 id 更新其登录账户
    pub async fn update_account(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        teacher_id: i64,
        req: UpdateTeacherAccountRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let view = update::update_teacher_account(&ctx, principal, teacher_id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            "Teacher account updated successfully",
        )))
    }
}
