//! 照片引用与地址解析

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// 照片存储桶名称
pub const PHOTO_BUCKET: &str = "photos";

// 已是完整地址的引用前缀
const PASSTHROUGH_PREFIXES: [&str; 4] = ["data:", "blob:", "http://", "https://"];

/// 存储引用转为可访问地址
///
/// 空引用返回空字符串；data/blob/http(s) 引用原样返回。
pub fn resolve_public_url(base_url: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if PASSTHROUGH_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 可选引用转为可选地址
pub fn photo_url(base_url: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| resolve_public_url(base_url, p))
}

/// 内联 data URI
pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:8080/api/v1/photos/";

    #[test]
    fn test_empty_path() {
        assert_eq!(resolve_public_url(BASE, ""), "");
        assert_eq!(photo_url(BASE, Some("")), None);
        assert_eq!(photo_url(BASE, None), None);
    }

    #[test]
    fn test_idempotent_on_inline_refs() {
        let data = "data:image/png;base64,iVBORw0KGgo=";
        let blob = "blob:http://localhost/3f1c";
        assert_eq!(resolve_public_url(BASE, data), data);
        assert_eq!(resolve_public_url(BASE, blob), blob);
        let once = resolve_public_url(BASE, "students/1_a.jpg");
        assert_eq!(resolve_public_url(BASE, &once), once);
    }

    #[test]
    fn test_bucket_path() {
        assert_eq!(
            resolve_public_url(BASE, "students/1_a.jpg"),
            "http://127.0.0.1:8080/api/v1/photos/students/1_a.jpg"
        );
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(to_data_uri("image/jpeg", b"abc"), "data:image/jpeg;base64,YWJj");
    }
}
