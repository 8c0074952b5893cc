use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::parents::requests::{
    CreateParentRequest, ParentListParams, UpdateParentRequest,
};
use crate::services::{ParentPortalService, ParentService};
use crate::utils::SafeIDI64;

static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);
static PARENT_PORTAL_SERVICE: Lazy<ParentPortalService> = Lazy::new(ParentPortalService::new_lazy);

pub async fn list_parents(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<ParentListParams>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .list_parents(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_parent(
    req: HttpRequest,
    session: SessionPrincipal,
    parent_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .get_parent(&req, session.principal(), parent_id.0)
        .await
}

pub async fn create_parent(
    req: HttpRequest,
    session: SessionPrincipal,
    parent_data: web::Json<CreateParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .create_parent(&req, session.principal(), parent_data.into_inner())
        .await
}

pub async fn update_parent(
    req: HttpRequest,
    session: SessionPrincipal,
    parent_id: SafeIDI64,
    update_data: web::Json<UpdateParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .update_parent(&req, session.principal(), parent_id.0, update_data.into_inner())
        .await
}

pub async fn delete_parent(
    req: HttpRequest,
    session: SessionPrincipal,
    parent_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .delete_parent(&req, session.principal(), parent_id.0)
        .await
}

pub async fn list_children(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    PARENT_PORTAL_SERVICE
        .list_children(&req, session.principal())
        .await
}

pub async fn child_overview(
    req: HttpRequest,
    session: SessionPrincipal,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARENT_PORTAL_SERVICE
        .child_overview(&req, session.principal(), student_id.0)
        .await
}

pub fn configure_parent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/parents")
            .route("", web::get().to(list_parents))
            .route("", web::post().to(create_parent))
            .route("/{id}", web::get().to(get_parent))
            .route("/{id}", web::put().to(update_parent))
            .route("/{id}", web::delete().to(delete_parent)),
    )
    .service(
        web::scope("/api/v1/parent-portal")
            .route("/children", web::get().to(list_children))
            .route("/children/{id}", web::get().to(child_overview)),
    );
}
