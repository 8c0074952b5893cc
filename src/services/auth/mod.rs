pub mod login;
pub mod logout;
pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::auth::entities::Principal;
use crate::models::auth::requests::LoginRequest;
use crate::services::{ServiceContext, resolve_context};

pub struct AuthService {
    context: Option<ServiceContext>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    // 登录并下发会话 Cookie
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        login::handle_login(&ctx, login_request).await
    }

    // 注销并清除 Cookie
    pub async fn logout(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        logout::handle_logout(&ctx, principal).await
    }

    // 当前主体
    pub async fn me(&self, principal: Option<&Principal>) -> ActixResult<HttpResponse> {
        profile::handle_me(principal)
    }
}
