use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::middlewares;
use crate::models::{
    ApiResponse,
    navigation::{NavigationMenu, ResolvedPage},
};

pub async fn get_menu() -> ActixResult<HttpResponse> {
    let menu = NavigationMenu::build(&AppConfig::get().app.system_name);
    Ok(HttpResponse::Ok().json(ApiResponse::success(menu, "Navigation menu")))
}

// 未知或未实现的页面解析为 UnderConstruction，不返回错误
pub async fn resolve_page(page: web::Path<String>) -> ActixResult<HttpResponse> {
    let resolved = ResolvedPage::new(&page.into_inner());
    Ok(HttpResponse::Ok().json(ApiResponse::success(resolved, "Page resolved")))
}

// 配置路由
pub fn configure_navigation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/navigation")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_menu))
            .route("/{page}", web::get().to(resolve_page)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{authed_app_storage, bearer};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_menu_and_resolution() {
        let (storage, token) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_navigation_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/navigation")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["home"]["key"], "dashboard");
        assert_eq!(body["data"]["groups"].as_array().unwrap().len(), 4);

        let req = test::TestRequest::get()
            .uri("/api/v1/navigation/not_a_page")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["screen"], "under_construction");
    }
}
