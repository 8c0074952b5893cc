pub mod create;
pub mod get;
pub mod list;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceStatsParams, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::auth::entities::Principal;
use crate::services::{ServiceContext, resolve_context};

pub struct AttendanceService {
    context: Option<ServiceContext>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_attendance(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Attendance records retrieved successfully",
        )))
    }

    pub async fn get_attendance(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let record = get::get_attendance(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record retrieved successfully",
        )))
    }

    // 管理层登记任意教师的考勤，教师只能为自己签到
    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let record = create::create_attendance(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            record,
            "Attendance recorded successfully",
        )))
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let record = update::update_attendance(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record updated successfully",
        )))
    }

    pub async fn attendance_stats(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: AttendanceStatsParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = stats::attendance_stats(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Attendance statistics retrieved successfully",
        )))
    }
}
