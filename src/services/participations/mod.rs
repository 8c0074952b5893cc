pub mod create;
pub mod delete;
pub mod evaluation;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::participations::requests::{
    CreateParticipationRequest, ParticipationListParams, SaveActivityEvaluationRequest,
    UpdateParticipationRequest,
};
use crate::services::{ServiceContext, resolve_context};

pub struct ParticipationService {
    context: Option<ServiceContext>,
}

impl ParticipationService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_participations(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: ParticipationListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_participations(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Participations retrieved successfully",
        )))
    }

    pub async fn get_participation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let participation = get::get_participation(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            participation,
            "Participation retrieved successfully",
        )))
    }

    pub async fn create_participation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateParticipationRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let participation = create::create_participation(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            participation,
            "Participation created successfully",
        )))
    }

    pub async fn update_participation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
        req: UpdateParticipationRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let participation = update::update_participation(&ctx, principal, id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            participation,
            "Participation updated successfully",
        )))
    }

    pub async fn delete_participation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        delete::delete_participation(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Participation deleted successfully",
        )))
    }

    // 参与记录当前的表现评价
    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        participation_id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = evaluation::get_evaluation(&ctx, principal, participation_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Activity evaluation retrieved successfully",
        )))
    }

    pub async fn save_evaluation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        participation_id: i64,
        req: SaveActivityEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = evaluation::save_evaluation(&ctx, principal, participation_id, req).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Activity evaluation saved successfully",
        )))
    }
}
