use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::collections::ListQuery;
use crate::services::CollectionService;

// 懒加载的全局 CollectionService 实例
static COLLECTION_SERVICE: Lazy<CollectionService> = Lazy::new(CollectionService::new_lazy);

pub async fn list_entities(
    req: HttpRequest,
    collection: web::Path<String>,
    query: web::Query<ListQuery>,
) -> ActixResult<HttpResponse> {
    COLLECTION_SERVICE
        .list(&req, collection.into_inner(), query.into_inner().search)
        .await
}

pub async fn create_entity(
    req: HttpRequest,
    collection: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> ActixResult<HttpResponse> {
    COLLECTION_SERVICE
        .create(&req, collection.into_inner(), body.into_inner())
        .await
}

pub async fn get_entity(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (collection, id) = path.into_inner();
    COLLECTION_SERVICE.get(&req, collection, id).await
}

pub async fn update_entity(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<serde_json::Value>,
) -> ActixResult<HttpResponse> {
    let (collection, id) = path.into_inner();
    COLLECTION_SERVICE
        .update(&req, collection, id, body.into_inner())
        .await
}

pub async fn delete_entity(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (collection, id) = path.into_inner();
    COLLECTION_SERVICE.delete(&req, collection, id).await
}

// 配置路由（通用集合路由需放在其他 /api/v1 路由之后）
pub fn configure_collection_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{collection}")
                    .route(web::get().to(list_entities))
                    .route(web::post().to(create_entity)),
            )
            .service(
                web::resource("/{collection}/{id}")
                    .route(web::get().to(get_entity))
                    .route(web::put().to(update_entity))
                    .route(web::delete().to(delete_entity)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{authed_app_storage, bearer};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_crud_round_trip() {
        let (storage, token) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_collection_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&token))
            .set_json(json!({"name": "Geography", "code": "GEO"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(ids.iter().filter(|i| **i == id).count(), 1);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/subjects/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"name": "World Geography"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "World Geography");
        assert_eq!(body["data"]["code"], "GEO");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/subjects/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/subjects/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_unknown_collection_and_bad_payload() {
        let (storage, token) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_collection_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/guardians")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2001);

        let req = test::TestRequest::post()
            .uri("/api/v1/students")
            .insert_header(bearer(&token))
            .set_json(json!({"first_name": "No", "last_name": "Dob"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1001);
    }

    #[actix_web::test]
    async fn test_student_search_and_join() {
        let (storage, token) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_collection_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/students?search=doe")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let students = body["data"].as_array().unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0]["admission_no"], "ADM001");
        assert_eq!(students[0]["class_label"]["grade"], "5");

        let req = test::TestRequest::get()
            .uri("/api/v1/classes")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["teacher_name"], "Sarah Connor");
    }

    #[actix_web::test]
    async fn test_requires_token() {
        let (storage, _) = authed_app_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_collection_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/students").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
