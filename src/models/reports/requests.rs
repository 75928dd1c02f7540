use serde::Deserialize;
use ts_rs::TS;

// 生成评语请求，context 缺省时使用学生备注
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportCommentRequest {
    #[serde(default)]
    pub context: Option<String>,
}
