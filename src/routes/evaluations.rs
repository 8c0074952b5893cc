use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::evaluations::requests::{CreateEvaluationRequest, EvaluationListParams};
use crate::services::EvaluationService;
use crate::utils::SafeIDI64;

static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

pub async fn list_evaluations(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<EvaluationListParams>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluations(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_evaluation(
    req: HttpRequest,
    session: SessionPrincipal,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_evaluation(&req, session.principal(), evaluation_id.0)
        .await
}

pub async fn create_evaluation(
    req: HttpRequest,
    session: SessionPrincipal,
    evaluation_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(&req, session.principal(), evaluation_data.into_inner())
        .await
}

pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .route("", web::get().to(list_evaluations))
            .route("", web::post().to(create_evaluation))
            .route("/{id}", web::get().to(get_evaluation)),
    );
}
