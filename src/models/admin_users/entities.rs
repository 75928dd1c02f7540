use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 管理员账号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
}
