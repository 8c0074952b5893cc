use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceStatsParams, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, session.principal(), query.into_inner())
        .await
}

pub async fn attendance_stats(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<AttendanceStatsParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_stats(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_attendance(
    req: HttpRequest,
    session: SessionPrincipal,
    record_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .get_attendance(&req, session.principal(), record_id.0)
        .await
}

pub async fn create_attendance(
    req: HttpRequest,
    session: SessionPrincipal,
    record_data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, session.principal(), record_data.into_inner())
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    session: SessionPrincipal,
    record_id: SafeIDI64,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, session.principal(), record_id.0, update_data.into_inner())
        .await
}

// 配置路由；`/stats` 必须先于 `/{id}` 注册
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .route("", web::get().to(list_attendance))
            .route("", web::post().to(create_attendance))
            .route("/stats", web::get().to(attendance_stats))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::put().to(update_attendance)),
    );
}
