use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SchoolError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time regex"));

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(SchoolError::invalid_input("Email format is invalid"));
    }
    Ok(())
}

/// 规范化邮箱（去空白、转小写）并校验格式
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    Ok(email)
}

/// 验证密码是否符合安全策略
///
/// 策略要求：至少 8 个字符，同时包含大写字母、小写字母和数字，且不是常见弱密码
pub fn validate_password(password: &str) -> Result<()> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "qwerty123", "admin1234", "abcd1234", "welcome1"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchoolError::invalid_input(errors.join("; ")))
    }
}

/// 必填文本字段
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchoolError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

/// 解析 `YYYY-MM-DD` 日期
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| SchoolError::date_parse(format!("{field} must be a date in YYYY-MM-DD format")))
}

/// 校验可选日期，返回规范化后的字符串
pub fn normalize_date(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(parse_date(field, v)?.format("%Y-%m-%d").to_string())),
        None => Ok(None),
    }
}

/// 校验可选时间（`HH:MM`）
pub fn normalize_time(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) if TIME_RE.is_match(v) => Ok(Some(v.to_string())),
        Some(_) => Err(SchoolError::invalid_input(format!(
            "{field} must be a time in HH:MM format"
        ))),
        None => Ok(None),
    }
}

/// 校验日期区间，起止都存在时要求起始不晚于结束
pub fn normalize_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<String>, Option<String>)> {
    let start = normalize_date("start_date", start)?;
    let end = normalize_date("end_date", end)?;
    if let (Some(s), Some(e)) = (&start, &end)
        && s > e
    {
        return Err(SchoolError::invalid_input(
            "start_date must not be after end_date",
        ));
    }
    Ok((start, end))
}
