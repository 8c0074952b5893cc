use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::participations::requests::{
    CreateParticipationRequest, ParticipationListParams, SaveActivityEvaluationRequest,
    UpdateParticipationRequest,
};
use crate::services::ParticipationService;
use crate::utils::SafeIDI64;

static PARTICIPATION_SERVICE: Lazy<ParticipationService> =
    Lazy::new(ParticipationService::new_lazy);

pub async fn list_participations(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<ParticipationListParams>,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .list_participations(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_participation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .get_participation(&req, session.principal(), participation_id.0)
        .await
}

pub async fn create_participation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_data: web::Json<CreateParticipationRequest>,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .create_participation(&req, session.principal(), participation_data.into_inner())
        .await
}

pub async fn update_participation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_id: SafeIDI64,
    update_data: web::Json<UpdateParticipationRequest>,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .update_participation(
            &req,
            session.principal(),
            participation_id.0,
            update_data.into_inner(),
        )
        .await
}

pub async fn delete_participation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .delete_participation(&req, session.principal(), participation_id.0)
        .await
}

pub async fn get_evaluation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .get_evaluation(&req, session.principal(), participation_id.0)
        .await
}

pub async fn save_evaluation(
    req: HttpRequest,
    session: SessionPrincipal,
    participation_id: SafeIDI64,
    evaluation_data: web::Json<SaveActivityEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    PARTICIPATION_SERVICE
        .save_evaluation(
            &req,
            session.principal(),
            participation_id.0,
            evaluation_data.into_inner(),
        )
        .await
}

pub fn configure_participation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/participations")
            .route("", web::get().to(list_participations))
            .route("", web::post().to(create_participation))
            .route("/{id}", web::get().to(get_participation))
            .route("/{id}", web::put().to(update_participation))
            .route("/{id}", web::delete().to(delete_participation))
            .route("/{id}/evaluation", web::get().to(get_evaluation))
            .route("/{id}/evaluation", web::put().to(save_evaluation)),
    );
}
