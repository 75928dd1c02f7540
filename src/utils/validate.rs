use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SchoolAdminError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 照片路径：存储桶内的相对路径，允许子目录
static PHOTO_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_./-]+$").expect("Invalid photo path regex"));

/// 必填字段校验，返回去除首尾空白后的值
pub fn validate_required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SchoolAdminError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// 可选字段归一化：空白字符串视为未填写
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 日期校验：YYYY-MM-DD
pub fn validate_iso_date(field: &str, value: String) -> Result<String> {
    let value = validate_required(field, value)?;
    chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
        SchoolAdminError::validation(format!("{field} must be a YYYY-MM-DD date: {e}"))
    })?;
    Ok(value)
}

/// 存储桶路径校验，拒绝目录穿越和绝对路径
pub fn validate_photo_path(path: &str) -> Result<()> {
    if path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|seg| seg == ".." || seg.is_empty())
        || !PHOTO_PATH_RE.is_match(path)
    {
        return Err(SchoolAdminError::validation(format!(
            "Invalid photo path: {path}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(
            validate_required("first_name", "  John ".to_string()).unwrap(),
            "John"
        );
        assert!(validate_required("first_name", "   ".to_string()).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("".to_string())), None);
        assert_eq!(normalize_optional(Some(" 1 ".to_string())), Some("1".to_string()));
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_email() {
        assert!(validate_email("sarah@school.edu").is_ok());
        assert!(validate_email("sarah.school.edu").is_err());
    }

    #[test]
    fn test_iso_date() {
        assert!(validate_iso_date("dob", "2015-05-15".to_string()).is_ok());
        assert!(validate_iso_date("dob", "15/05/2015".to_string()).is_err());
        assert!(validate_iso_date("dob", "2015-02-30".to_string()).is_err());
    }

    #[test]
    fn test_photo_path() {
        assert!(validate_photo_path("students/1700000000000_john.jpg").is_ok());
        assert!(validate_photo_path("../etc/passwd").is_err());
        assert!(validate_photo_path("/abs.jpg").is_err());
        assert!(validate_photo_path("students//a.jpg").is_err());
        assert!(validate_photo_path("students/a b.jpg").is_err());
    }
}
