//! 存储模式判定

use serde::Serialize;

use crate::config::DatabaseConfig;

// 常见的占位 URL 片段
const PLACEHOLDER_MARKERS: [&str; 6] = [
    "xyz.supabase.co",
    "your-project",
    "example.com",
    "changeme",
    "<",
    ">",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// 真实数据库 + 照片存储桶
    Live,
    /// 进程内示例数据
    Demo,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Live => "live",
            StorageMode::Demo => "demo",
        }
    }

    /// 根据配置判定模式
    ///
    /// `mode` 为 `live` / `demo` 时直接采用；`auto` 时 URL 为空或为占位值则为 Demo。
    pub fn detect(config: &DatabaseConfig) -> Self {
        match config.mode.trim().to_lowercase().as_str() {
            "live" => StorageMode::Live,
            "demo" => StorageMode::Demo,
            _ if is_placeholder_url(&config.url) => StorageMode::Demo,
            _ => StorageMode::Live,
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_placeholder_url(url: &str) -> bool {
    let url = url.trim();
    url.is_empty()
        || url.starts_with("process.env")
        || PLACEHOLDER_MARKERS.iter().any(|m| url.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(mode: &str, url: &str) -> DatabaseConfig {
        DatabaseConfig {
            mode: mode.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auto_detects_placeholders() {
        assert_eq!(StorageMode::detect(&db("auto", "")), StorageMode::Demo);
        assert_eq!(
            StorageMode::detect(&db("auto", "https://xyz.supabase.co")),
            StorageMode::Demo
        );
        assert_eq!(
            StorageMode::detect(&db("auto", "postgres://user:pw@your-project.host/db")),
            StorageMode::Demo
        );
        assert_eq!(
            StorageMode::detect(&db("auto", "process.env.SUPABASE_URL")),
            StorageMode::Demo
        );
        assert_eq!(
            StorageMode::detect(&db("auto", "postgres://<user>@db/app")),
            StorageMode::Demo
        );
    }

    #[test]
    fn test_auto_detects_live() {
        assert_eq!(
            StorageMode::detect(&db("auto", "sqlite://school.db?mode=rwc")),
            StorageMode::Live
        );
        assert_eq!(
            StorageMode::detect(&db("", "postgres://app@10.0.0.5/school")),
            StorageMode::Live
        );
    }

    #[test]
    fn test_explicit_mode_wins() {
        assert_eq!(StorageMode::detect(&db("demo", "school.db")), StorageMode::Demo);
        assert_eq!(StorageMode::detect(&db("LIVE", "")), StorageMode::Live);
    }
}
