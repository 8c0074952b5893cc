use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::lookups::requests::CreateLookupRequest;
use crate::services::LookupService;

static LOOKUP_SERVICE: Lazy<LookupService> = Lazy::new(LookupService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    LOOKUP_SERVICE
        .list_departments(&req, session.principal())
        .await
}

pub async fn create_department(
    req: HttpRequest,
    session: SessionPrincipal,
    data: web::Json<CreateLookupRequest>,
) -> ActixResult<HttpResponse> {
    LOOKUP_SERVICE
        .create_department(&req, session.principal(), data.into_inner())
        .await
}

pub async fn list_subjects(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    LOOKUP_SERVICE.list_subjects(&req, session.principal()).await
}

pub async fn create_subject(
    req: HttpRequest,
    session: SessionPrincipal,
    data: web::Json<CreateLookupRequest>,
) -> ActixResult<HttpResponse> {
    LOOKUP_SERVICE
        .create_subject(&req, session.principal(), data.into_inner())
        .await
}

pub fn configure_lookup_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .route("", web::get().to(list_departments))
            .route("", web::post().to(create_department)),
    )
    .service(
        web::scope("/api/v1/subjects")
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject)),
    );
}
