pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::{contains_pattern, escape_like_pattern};
