/*!
 * 会话解析中间件
 *
 * 从 Cookie 中读取会话令牌，校验签名与有效期后把 `Option<Principal>` 写入请求扩展。
 * 该中间件从不拒绝请求：是否需要登录由各操作的权限检查决定。
 *
 * ```rust,ignore
 * App::new()
 *     .wrap(ResolveSession)
 *     .route("/me", web::get().to(|session: SessionPrincipal| async move { ... }))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

use crate::models::auth::entities::Principal;
use crate::utils::jwt::JwtUtils;

/// 解析请求的会话；令牌缺失、签名错误、过期或声明无法识别时返回 `None`
pub fn resolve_session(request: &HttpRequest) -> Option<Principal> {
    let token = JwtUtils::extract_session_token(request)?;
    match JwtUtils::verify_token(&token) {
        Ok(claims) => claims.into_principal(),
        Err(err) => {
            debug!("会话令牌校验失败 {}: {}", request.path(), err);
            None
        }
    }
}

#[derive(Clone)]
pub struct ResolveSession;

impl<S, B> Transform<S, ServiceRequest> for ResolveSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ResolveSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResolveSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ResolveSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ResolveSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let principal = resolve_session(req.request());
            if let Some(p) = &principal {
                debug!("会话主体 {} ({})", p.id, p.role);
            }
            req.extensions_mut().insert(principal);
            srv.call(req).await
        })
    }
}

/// 处理程序参数：当前请求的主体，未登录时为 `None`
///
/// 优先读取中间件写入的结果，未挂载中间件时直接解析 Cookie。
#[derive(Debug, Clone)]
pub struct SessionPrincipal(pub Option<Principal>);

impl SessionPrincipal {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl FromRequest for SessionPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let resolved = req.extensions().get::<Option<Principal>>().cloned();
        let principal = match resolved {
            Some(principal) => principal,
            None => resolve_session(req),
        };
        ready(Ok(SessionPrincipal(principal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::auth::entities::Role;
    use actix_web::{App, HttpResponse, test, web};

    async fn whoami(session: SessionPrincipal) -> HttpResponse {
        match session.principal() {
            Some(p) => HttpResponse::Ok().body(format!("{}:{}", p.id, p.role)),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_valid_cookie_resolves_principal() {
        let app = test::init_service(
            App::new()
                .wrap(ResolveSession)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let token =
            JwtUtils::issue_session_token(&Principal::new(5, "Sara", Role::Teacher)).unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(JwtUtils::create_session_cookie(&token))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"5:teacher");
    }

    #[actix_web::test]
    async fn test_bad_or_missing_cookie_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(ResolveSession)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"anonymous");

        let expired = JwtUtils::issue_token_with_expiry(
            &Principal::new(5, "Sara", Role::Teacher),
            chrono::Duration::hours(-30),
        )
        .unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(actix_web::cookie::Cookie::new(
                AppConfig::get().jwt.cookie_name.clone(),
                expired,
            ))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"anonymous");
    }

    #[::core::prelude::v1::test]
    fn test_extractor_without_middleware() {
        let token =
            JwtUtils::issue_session_token(&Principal::new(9, "Omar", Role::Parent)).unwrap();
        let req = test::TestRequest::default()
            .cookie(JwtUtils::create_session_cookie(&token))
            .to_http_request();
        assert_eq!(
            resolve_session(&req),
            Some(Principal::new(9, "Omar", Role::Parent))
        );
    }
}
