use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 监护人，仅声明结构，暂无对应的增删改查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/guardian.ts")]
pub struct Guardian {
    pub id: String,
    pub full_name: String,
    // 与学生的关系
    pub relationship: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}
