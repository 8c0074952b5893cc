use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_student(
    req: HttpRequest,
    session: SessionPrincipal,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_student(&req, session.principal(), student_id.0)
        .await
}

pub async fn create_student(
    req: HttpRequest,
    session: SessionPrincipal,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, session.principal(), student_data.into_inner())
        .await
}

pub async fn update_student(
    req: HttpRequest,
    session: SessionPrincipal,
    student_id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, session.principal(), student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    session: SessionPrincipal,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .delete_student(&req, session.principal(), student_id.0)
        .await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student)),
    );
}
