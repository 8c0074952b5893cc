//! 请求体与查询参数的反序列化错误处理

use actix_web::{
    HttpRequest,
    error::{JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::errors::SchoolError;

/// JSON 请求体错误统一映射为 InvalidInput
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON 请求体解析失败 {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        _ => "Invalid request body".to_string(),
    };
    SchoolError::invalid_input(message).into()
}

/// 查询参数错误统一映射为 InvalidInput
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("查询参数解析失败 {}: {}", req.path(), err);
    SchoolError::invalid_input(format!("Invalid query parameters: {err}")).into()
}
