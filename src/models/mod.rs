//! 数据模型定义
//!
//! 业务实体、请求与响应结构，与 `entity` 模块中的数据库实体分离。

pub mod admin_users;
pub mod auth;
pub mod classes;
pub mod collections;
pub mod common;
pub mod dashboard;
pub mod guardians;
pub mod navigation;
pub mod photos;
pub mod reports;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use common::{ApiResponse, ErrorCode};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
