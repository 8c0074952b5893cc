use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::SessionPrincipal;
use crate::models::notes::requests::{CreateNoteRequest, NoteListParams};
use crate::services::NoteService;
use crate::utils::SafeIDI64;

static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn list_notes(
    req: HttpRequest,
    session: SessionPrincipal,
    query: web::Query<NoteListParams>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .list_notes(&req, session.principal(), query.into_inner())
        .await
}

pub async fn get_note(
    req: HttpRequest,
    session: SessionPrincipal,
    note_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.get_note(&req, session.principal(), note_id.0).await
}

pub async fn create_note(
    req: HttpRequest,
    session: SessionPrincipal,
    note_data: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .create_note(&req, session.principal(), note_data.into_inner())
        .await
}

pub fn configure_note_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note)),
    );
}
