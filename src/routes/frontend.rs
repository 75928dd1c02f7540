//! 管理后台前端
//!
//! 前端构建产物通过 rust-embed 嵌入，非 API 路径统一回退到 index.html。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct DashboardAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// 打包产物带 hash，可长期缓存
fn is_immutable_asset(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp"
    )
}

fn render_index(content: &[u8], config: &AppConfig) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%SYSTEM_NAME%", &config.app.system_name)
        .into_bytes()
}

fn asset(path: &str) -> Option<Vec<u8>> {
    DashboardAssets::get(path).map(|f| f.data.to_vec())
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // 未匹配的 API 路径不回退到页面
    if path == "api" || path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "API endpoint not found",
        )));
    }

    let (content, file_path) = match (path.is_empty(), asset(path)) {
        (false, Some(content)) => (Some(content), path),
        _ => (asset("index.html"), "index.html"),
    };

    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Dashboard assets are not embedded in this build"));
    };

    let mime = mime_type(file_path);
    if mime.starts_with("text/html") {
        data = render_index(&data, AppConfig::get());
    }

    let cache_control = if is_immutable_asset(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache, no-store, must-revalidate"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control))
        .body(data))
}

/// 配置前端路由（放在最后作为 fallback）
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode};
    use actix_web::test as actix_test;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_type("app.js"), "application/javascript; charset=utf-8");
        assert_eq!(mime_type("photo.webp"), "image/webp");
        assert_eq!(mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_immutable_assets() {
        assert!(is_immutable_asset("assets/app.3f2a.js"));
        assert!(!is_immutable_asset("index.html"));
    }

    #[actix_web::test]
    async fn test_spa_fallback_and_api_miss() {
        let app = actix_test::init_service(App::new().configure(configure_frontend_routes)).await;

        let req = actix_test::TestRequest::get().uri("/students/list").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get().uri("/api/v2/unknown").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
