use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/photo.ts")]
pub struct PhotoUploadResponse {
    // 存储引用：存储桶相对路径或 data URI
    pub path: String,
    // 可直接访问的地址
    pub url: String,
}
