//! 路径参数提取器

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::SchoolError;

/// 路径中的 `{id}`，必须是正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    fn parse(raw: Option<&str>) -> Result<Self, SchoolError> {
        raw.and_then(|value| value.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(SafeIDI64)
            .ok_or_else(|| SchoolError::invalid_input("Invalid id in path"))
    }
}

impl FromRequest for SafeIDI64 {
    type Error = SchoolError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req.match_info().get("id")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(SafeIDI64::parse(Some("12")).unwrap(), SafeIDI64(12));
        assert!(SafeIDI64::parse(Some("0")).is_err());
        assert!(SafeIDI64::parse(Some("-5")).is_err());
        assert!(SafeIDI64::parse(Some("abc")).is_err());
        assert!(SafeIDI64::parse(None).is_err());
    }
}
