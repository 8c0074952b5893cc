use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::activities::requests::{
    ActivityListParams, CreateActivityCategoryRequest, CreateActivityRequest,
    UpdateActivityRequest,
};
use crate::services::{ActivityService, CategoryService};
use crate::utils::SafeIDI64;

static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);
static CATEGORY_SERVICE: Lazy<CategoryService> = Lazy::new(CategoryService::new_lazy);

pub async fn list_activities(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<ActivityListParams>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_activities(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_activity(
    req: HttpRequest,
    session: SessionPrincipal,
    activity_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .get_activity(&req, session.principal(), activity_id.0)
        .await
}

pub async fn create_activity(
    req: HttpRequest,
    session: SessionPrincipal,
    activity_data: web::Json<CreateActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .create_activity(&req, session.principal(), activity_data.into_inner())
        .await
}

pub async fn update_activity(
    req: HttpRequest,
    session: SessionPrincipal,
    activity_id: SafeIDI64,
    update_data: web::Json<UpdateActivityRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .update_activity(&req, session.principal(), activity_id.0, update_data.into_inner())
        .await
}

pub async fn delete_activity(
    req: HttpRequest,
    session: SessionPrincipal,
    activity_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .delete_activity(&req, session.principal(), activity_id.0)
        .await
}

// 分类列表无需登录
pub async fn list_categories(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    CATEGORY_SERVICE
        .list_categories(&req, session.principal())
        .await
}

pub async fn create_category(
    req: HttpRequest,
    session: SessionPrincipal,
    category_data: web::Json<CreateActivityCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CATEGORY_SERVICE
        .create_category(&req, session.principal(), category_data.into_inner())
        .await
}

pub fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .route("", web::get().to(list_activities))
            .route("", web::post().to(create_activity))
            .route("/{id}", web::get().to(get_activity))
            .route("/{id}", web::put().to(update_activity))
            .route("/{id}", web::delete().to(delete_activity)),
    )
    .service(
        web::scope("/api/v1/activity-categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category)),
    );
}
