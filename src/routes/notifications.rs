use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::notifications::requests::NotificationListParams;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<NotificationListParams>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, session.principal(), query.into_inner())
        .await
}

pub async fn unread_count(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .unread_count(&req, session.principal())
        .await
}

pub async fn mark_read(
    req: HttpRequest,
    session: SessionPrincipal,
    notification_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_read(&req, session.principal(), notification_id.0)
        .await
}

pub async fn mark_all_read(
    req: HttpRequest,
    session: SessionPrincipal,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_all_read(&req, session.principal())
        .await
}

// 固定路径先于 `/{id}` 注册
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(unread_count))
            .route("/read-all", web::put().to(mark_all_read))
            .route("/{id}/read", web::put().to(mark_read)),
    );
}
