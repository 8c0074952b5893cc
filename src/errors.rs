//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。
//! 所有错误在 HTTP 边界统一渲染为 `{"error": "..."}`。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(SchoolError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    Unauthenticated("E001", "Unauthenticated", UNAUTHORIZED),
    InvalidCredentials("E002", "Invalid Credentials", UNAUTHORIZED),
    Forbidden("E003", "Forbidden", FORBIDDEN),
    NotFound("E004", "Resource Not Found", NOT_FOUND),
    InvalidInput("E005", "Invalid Input", BAD_REQUEST),
    Conflict("E006", "Conflict", BAD_REQUEST),
    DateParse("E007", "Date Parse Error", BAD_REQUEST),
    DatabaseConfig("E008", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E009", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E010", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E011", "Serialization Error", INTERNAL_SERVER_ERROR),
    Internal("E012", "Internal Error", INTERNAL_SERVER_ERROR),
}

/// 500 类错误对外统一使用的提示
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl SchoolError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 返回给调用方的消息，内部错误不暴露细节
    pub fn public_message(&self) -> &str {
        if self.is_internal() {
            INTERNAL_ERROR_MESSAGE
        } else {
            self.message()
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl ResponseError for SchoolError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            tracing::error!("[{}] {}", self.code(), self.format_simple());
        }
        HttpResponse::build(self.status()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}

/// 按约束类型对数据库错误分类
///
/// 唯一约束冲突 -> Conflict，外键约束 -> InvalidInput，其余 -> DatabaseOperation
pub fn db_error(context: &'static str) -> impl FnOnce(DbErr) -> SchoolError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            SchoolError::conflict(format!("{context}: duplicate value"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            SchoolError::invalid_input(format!("{context}: referenced record does not exist"))
        }
        _ => SchoolError::database_operation(format!("{context}: {err}")),
    }
}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SchoolError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::unauthenticated("test").code(), "E001");
        assert_eq!(SchoolError::forbidden("test").code(), "E003");
        assert_eq!(SchoolError::invalid_input("test").code(), "E005");
        assert_eq!(SchoolError::internal("test").code(), "E012");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SchoolError::unauthenticated("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(SchoolError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(SchoolError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(SchoolError::conflict("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            SchoolError::database_operation("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::invalid_input("teacher_id is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Input"));
        assert!(formatted.contains("teacher_id is required"));
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = SchoolError::database_operation("UNIQUE constraint failed: secret_table.col");
        let body = err.error_response().into_body().try_into_bytes().unwrap();
        assert_eq!(&body[..], br#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn test_not_found_body_shape() {
        let err = SchoolError::not_found("Attendance record not found");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = resp.into_body().try_into_bytes().unwrap();
        assert_eq!(&body[..], br#"{"error":"Attendance record not found"}"#);
    }
}
