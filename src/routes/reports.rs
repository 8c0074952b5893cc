use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::reports::requests::ReportParams;
use crate::services::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn generate_report(
    req: HttpRequest,
    session: SessionPrincipal,
    report_type: web::Path<String>,
    query: web::Query<ReportParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .generate_report(&req, session.principal(), &report_type, query.into_inner())
        .await
}

pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/reports").route("/{report_type}", web::get().to(generate_report)));
}
