use serde::Deserialize;
use ts_rs::TS;

use super::entities::Gender;
use crate::errors::Result;
use crate::utils::validate::{normalize_optional, validate_iso_date, validate_required};

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateStudentRequest {
    /// 校验并归一化：必填字段去空白，空的可选字段置为 None
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            admission_no: validate_required("admission_no", self.admission_no)?,
            first_name: validate_required("first_name", self.first_name)?,
            last_name: validate_required("last_name", self.last_name)?,
            dob: validate_iso_date("dob", self.dob)?,
            gender: self.gender,
            class_id: normalize_optional(self.class_id),
            teacher_id: normalize_optional(self.teacher_id),
            roll_no: self.roll_no.trim().to_string(),
            photo_path: normalize_optional(self.photo_path),
            notes: normalize_optional(self.notes),
        })
    }
}

// 更新学生请求
//
// 可选引用字段（class_id / teacher_id / photo_path / notes）传空字符串表示清空
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub admission_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<Gender>,
    pub class_id: Option<String>,
    pub teacher_id: Option<String>,
    pub roll_no: Option<String>,
    pub photo_path: Option<String>,
    pub notes: Option<String>,
}

impl UpdateStudentRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            admission_no: self
                .admission_no
                .map(|v| validate_required("admission_no", v))
                .transpose()?,
            first_name: self
                .first_name
                .map(|v| validate_required("first_name", v))
                .transpose()?,
            last_name: self
                .last_name
                .map(|v| validate_required("last_name", v))
                .transpose()?,
            dob: self.dob.map(|v| validate_iso_date("dob", v)).transpose()?,
            gender: self.gender,
            class_id: self.class_id.map(|v| v.trim().to_string()),
            teacher_id: self.teacher_id.map(|v| v.trim().to_string()),
            roll_no: self.roll_no.map(|v| v.trim().to_string()),
            photo_path: self.photo_path.map(|v| v.trim().to_string()),
            notes: self.notes.map(|v| v.trim().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "admission_no": " ADM003 ",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "dob": "2015-12-10",
            "class_id": "",
            "notes": "  "
        }))
        .unwrap()
    }

    #[test]
    fn test_create_defaults_and_normalization() {
        let req = request().validate().unwrap();
        assert_eq!(req.admission_no, "ADM003");
        assert_eq!(req.gender, Gender::Male);
        assert_eq!(req.class_id, None);
        assert_eq!(req.notes, None);
        assert_eq!(req.roll_no, "");
    }

    #[test]
    fn test_create_rejects_bad_date() {
        let mut req = request();
        req.dob = "10/12/2015".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_unknown_gender() {
        let result = serde_json::from_value::<CreateStudentRequest>(serde_json::json!({
            "admission_no": "ADM003",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "dob": "2015-12-10",
            "gender": "Unknown"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let req = UpdateStudentRequest {
            last_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
