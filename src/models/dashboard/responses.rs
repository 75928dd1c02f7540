use serde::Serialize;
use ts_rs::TS;

// 仪表盘统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardStats {
    pub students: u32,
    pub teachers: u32,
    pub classes: u32,
    // 存储模式：live / demo
    pub mode: String,
}
