pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::services::{ServiceContext, resolve_context};

pub struct TeacherService {
    context: Option<ServiceContext>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    // 教师列表；教师角色只能看到自己的档案
    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: TeacherListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_teachers(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Teachers retrieved successfully",
        )))
    }

    pub async fn get_teacher(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let teacher = get::get_teacher(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        )))
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let teacher = create::create_teacher(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            teacher,
            "Teacher created successfully",
        )))
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let teacher = update::update_teacher(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        )))
    }

    // 删除教师及其考勤、评估、备注
    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        delete::delete_teacher(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
    }
}
