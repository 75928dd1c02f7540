use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: String,
    // 年级
    pub grade: String,
    // 班别
    pub section: String,
    // 学年
    pub academic_year: String,
    // 班主任ID
    pub class_teacher_id: Option<String>,
}

impl Class {
    pub fn label(&self) -> ClassLabel {
        ClassLabel {
            grade: self.grade.clone(),
            section: self.section.clone(),
        }
    }
}

// 班级标签（年级 + 班别），附在学生列表上
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassLabel {
    pub grade: String,
    pub section: String,
}

// 班级列表视图，teacher_name 由读取时关联得出，不落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassWithTeacher {
    #[serde(flatten)]
    pub class: Class,
    pub teacher_name: Option<String>,
}
