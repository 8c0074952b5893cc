pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::notes::requests::{CreateNoteRequest, NoteListParams};
use crate::services::{ServiceContext, resolve_context};

pub struct NoteService {
    context: Option<ServiceContext>,
}

impl NoteService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_notes(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: NoteListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_notes(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(data, "Notes retrieved successfully")))
    }

    pub async fn get_note(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let note = get::get_note(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(note, "Note retrieved successfully")))
    }

    pub async fn create_note(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let note = create::create_note(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(note, "Note created successfully")))
    }
}
