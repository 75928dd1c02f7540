pub mod auth;

pub mod collections;

pub mod dashboard;

pub mod navigation;

pub mod photos;

pub mod reports;

pub mod students;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use collections::configure_collection_routes;
pub use dashboard::configure_dashboard_routes;
pub use frontend::configure_frontend_routes;
pub use navigation::configure_navigation_routes;
pub use photos::configure_photo_routes;
pub use reports::configure_report_routes;
pub use students::configure_student_routes;

/// 按匹配优先级注册全部路由：具体路由在前，通用集合路由其次，前端兜底最后
pub fn configure_all_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_navigation_routes)
        .configure(configure_report_routes)
        .configure(configure_photo_routes)
        .configure(configure_student_routes)
        .configure(configure_collection_routes)
        .configure(configure_frontend_routes);
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::storage::{Storage, memory_storage::MemoryStorage};
    use crate::utils::jwt::JwtUtils;
    use crate::utils::password::hash_password;

    pub const TEST_BASE_URL: &str = "http://127.0.0.1:8080/api/v1/photos";

    /// 带示例数据和 admin/admin123 账号的演示存储，附带一个有效 access token
    pub async fn authed_app_storage() -> (Arc<dyn Storage>, String) {
        let storage = MemoryStorage::seeded(TEST_BASE_URL);
        let hash = hash_password("admin123").unwrap();
        let admin = storage.create_admin_user("admin", &hash).await.unwrap();
        let token = JwtUtils::generate_access_token(&admin.id).unwrap();
        (Arc::new(storage), token)
    }

    pub fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;
    use test_support::{authed_app_storage, bearer};

    #[actix_web::test]
    async fn test_specific_routes_win_over_collections() {
        let (storage, token) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/stats")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["students"], 2);
        assert_eq!(body["data"]["mode"], "demo");

        let req = test::TestRequest::get()
            .uri("/api/v1/teachers")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["full_name"], "James Logan");

        // 演示模式不保存文件
        let req = test::TestRequest::get()
            .uri("/api/v1/photos/students/1_a.jpg")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
