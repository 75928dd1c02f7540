use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    // 教师ID
    pub id: String,
    // 工号
    pub teacher_no: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    // 学历/资质
    pub qualifications: String,
    // 入职日期 YYYY-MM-DD
    pub hire_date: String,
    pub photo_path: Option<String>,
}

// 教师列表视图，附带照片地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherView {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub photo_url: Option<String>,
}
