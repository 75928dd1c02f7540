use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::{normalize_optional, validate_required};

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub grade: String,
    pub section: String,
    pub academic_year: String,
    #[serde(default)]
    pub class_teacher_id: Option<String>,
}

impl CreateClassRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            grade: validate_required("grade", self.grade)?,
            section: validate_required("section", self.section)?,
            academic_year: validate_required("academic_year", self.academic_year)?,
            class_teacher_id: normalize_optional(self.class_teacher_id),
        })
    }
}

// 更新班级请求，class_teacher_id 传空字符串表示取消班主任
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub grade: Option<String>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub class_teacher_id: Option<String>,
}

impl UpdateClassRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            grade: self
                .grade
                .map(|v| validate_required("grade", v))
                .transpose()?,
            section: self
                .section
                .map(|v| validate_required("section", v))
                .transpose()?,
            academic_year: self
                .academic_year
                .map(|v| validate_required("academic_year", v))
                .transpose()?,
            class_teacher_id: self.class_teacher_id.map(|v| v.trim().to_string()),
        })
    }
}
