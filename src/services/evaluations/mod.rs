pub mod create;
pub mod get;
pub mod list;
pub mod score;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::evaluations::requests::{CreateEvaluationRequest, EvaluationListParams};
use crate::services::{ServiceContext, resolve_context};

pub struct EvaluationService {
    context: Option<ServiceContext>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn list_evaluations(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        params: EvaluationListParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let data = list::list_evaluations(&ctx, principal, params).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            data,
            "Evaluations retrieved successfully",
        )))
    }

    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let evaluation = get::get_evaluation(&ctx, principal, id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Evaluation retrieved successfully",
        )))
    }

    pub async fn create_evaluation(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        req: CreateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let evaluation = create::create_evaluation(&ctx, principal, req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            evaluation,
            "Evaluation created successfully",
        )))
    }
}
