use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::audit::requests::AuditLogListParams;
use crate::services::AuditLogService;

static AUDIT_LOG_SERVICE: Lazy<AuditLogService> = Lazy::new(AuditLogService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<AuditLogListParams>,
) -> ActixResult<HttpResponse> {
    AUDIT_LOG_SERVICE
        .list_audit_logs(&req, session.principal(), query.into_inner())
        .await
}

// 只读
pub fn configure_audit_log_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/audit-logs").route("", web::get().to(list_audit_logs)));
}
