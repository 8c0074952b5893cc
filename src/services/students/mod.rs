pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::services::{ServiceContext, resolve_context};

pub(crate) const NOT_FOUND: &str = "Student not found";

pub struct StudentService {
    context: Option<ServiceContext>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_students(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Students retrieved successfully",
        )))
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let student = get::get_student(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        )))
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let student = create::create_student(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            student,
            "Student created successfully",
        )))
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let student = update::update_student(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        )))
    }

    // 先删除评价与参与记录，再删除学生
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        delete::delete_student(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
    }
}
