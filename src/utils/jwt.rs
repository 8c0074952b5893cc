use crate::config::AppConfig;
use crate::models::auth::entities::{Principal, Role};
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// 会话有效期（小时），自签发起固定计算
pub const SESSION_LIFETIME_HOURS: i64 = 24;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // 主体 ID
    pub name: String, // 显示名称
    pub role: String, // 角色
    pub exp: usize,   // 过期时间 (时间戳)
    pub iat: usize,   // 签发时间
}

impl Claims {
    /// 映射为请求主体；sub 或 role 无法解析时返回 None
    pub fn into_principal(self) -> Option<Principal> {
        let id = self.sub.parse::<i64>().ok()?;
        let role = self.role.parse::<Role>().ok()?;
        Some(Principal::new(id, self.name, role))
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 签发会话令牌
    pub fn issue_session_token(principal: &Principal) -> Result<String, jsonwebtoken::errors::Error> {
        Self::issue_token_with_expiry(principal, chrono::Duration::hours(SESSION_LIFETIME_HOURS))
    }

    // 签发带自定义有效期的令牌
    pub fn issue_token_with_expiry(
        principal: &Principal,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: principal.id.to_string(),
            name: principal.display_name.clone(),
            role: principal.role.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证令牌签名与有效期
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::hours(
                SESSION_LIFETIME_HOURS,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话令牌
    pub fn extract_session_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(&AppConfig::get().jwt.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }
}
