use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::accounts::requests::{
    GrantTeacherAccountRequest, TeacherAccountListParams, UpdateTeacherAccountRequest,
};
use crate::services::TeacherAccountService;
use crate::utils::SafeIDI64;

static TEACHER_ACCOUNT_SERVICE: Lazy<TeacherAccountService> =
    Lazy::new(TeacherAccountService::new_lazy);

pub async fn list_accounts(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<TeacherAccountListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_ACCOUNT_SERVICE
        .list_accounts(&req, session.principal(), query.into_inner())
        .await
}

pub async fn grant_account(
    req: HttpRequest,
    session: SessionPrincipal,
    grant_data: web::Json<GrantTeacherAccountRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_ACCOUNT_SERVICE
        .grant_account(&req, session.principal(), grant_data.into_inner())
        .await
}

// 路径中的 id 是教师档案 id
pub async fn update_account(
    req: HttpRequest,
    session: SessionPrincipal,
    teacher_id: SafeIDI64,
    update_data: web::Json<UpdateTeacherAccountRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_ACCOUNT_SERVICE
        .update_account(&req, session.principal(), teacher_id.0, update_data.into_inner())
        .await
}

pub fn configure_teacher_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher-accounts")
            .route("", web::get().to(list_accounts))
            .route("", web::post().to(grant_account))
            .route("/{id}", web::put().to(update_account)),
    );
}
