use actix_web::{HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::ApiResponse;
use crate::models::auth::{entities::Principal, responses::CurrentUserResponse};

pub fn handle_me(principal: Option<&Principal>) -> ActixResult<HttpResponse> {
    let user = principal
        .cloned()
        .ok_or_else(|| SchoolError::unauthenticated("Authentication required"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CurrentUserResponse { user },
        "Current user retrieved successfully",
    )))
}
