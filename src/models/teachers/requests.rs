use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{Result, SchoolAdminError};
use crate::utils::validate::{
    normalize_optional, validate_email, validate_iso_date, validate_required,
};

// 创建教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub teacher_no: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub qualifications: String,
    pub hire_date: String,
    #[serde(default)]
    pub photo_path: Option<String>,
}

fn check_email(email: String) -> Result<String> {
    let email = email.trim().to_string();
    if !email.is_empty() {
        validate_email(&email).map_err(SchoolAdminError::validation)?;
    }
    Ok(email)
}

impl CreateTeacherRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            teacher_no: validate_required("teacher_no", self.teacher_no)?,
            full_name: validate_required("full_name", self.full_name)?,
            phone: self.phone.trim().to_string(),
            email: check_email(self.email)?,
            qualifications: self.qualifications.trim().to_string(),
            hire_date: validate_iso_date("hire_date", self.hire_date)?,
            photo_path: normalize_optional(self.photo_path),
        })
    }
}

// 更新教师请求，photo_path 传空字符串表示清空
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub teacher_no: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub qualifications: Option<String>,
    pub hire_date: Option<String>,
    pub photo_path: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            teacher_no: self
                .teacher_no
                .map(|v| validate_required("teacher_no", v))
                .transpose()?,
            full_name: self
                .full_name
                .map(|v| validate_required("full_name", v))
                .transpose()?,
            phone: self.phone.map(|v| v.trim().to_string()),
            email: self.email.map(check_email).transpose()?,
            qualifications: self.qualifications.map(|v| v.trim().to_string()),
            hire_date: self
                .hire_date
                .map(|v| validate_iso_date("hire_date", v))
                .transpose()?,
            photo_path: self.photo_path.map(|v| v.trim().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_optional_but_checked() {
        let req: CreateTeacherRequest = serde_json::from_value(serde_json::json!({
            "teacher_no": "T003",
            "full_name": "Ellen Ripley",
            "hire_date": "2022-09-01"
        }))
        .unwrap();
        assert!(req.clone().validate().is_ok());

        let bad = CreateTeacherRequest {
            email: "not-an-email".to_string(),
            ..req
        };
        assert!(bad.validate().is_err());
    }
}
