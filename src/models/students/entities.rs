use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::ClassLabel;

// 学生性别
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const MALE: &'static str = "Male";
    pub const FEMALE: &'static str = "Female";
    pub const OTHER: &'static str = "Other";
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "{}", Gender::MALE),
            Gender::Female => write!(f, "{}", Gender::FEMALE),
            Gender::Other => write!(f, "{}", Gender::OTHER),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Gender::MALE => Ok(Gender::Male),
            Gender::FEMALE => Ok(Gender::Female),
            Gender::OTHER => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    // 学生ID
    pub id: String,
    // 学号（预期校内唯一，不做强制校验）
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    // 出生日期 YYYY-MM-DD
    pub dob: String,
    pub gender: Gender,
    // 所属班级ID
    pub class_id: Option<String>,
    // 指定教师ID
    pub teacher_id: Option<String>,
    // 班内座号
    pub roll_no: String,
    // 照片存储路径或 data URI
    pub photo_path: Option<String>,
    // 备注
    pub notes: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_assigned_to_class(&self) -> bool {
        self.class_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

// 学生列表视图，附带班级标签与照片地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentWithClass {
    #[serde(flatten)]
    pub student: Student,
    pub class_label: Option<ClassLabel>,
    pub photo_url: Option<String>,
}
