use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::ReportCommentRequest;
use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn student_comment(
    req: HttpRequest,
    student_id: web::Path<String>,
    body: Option<web::Json<ReportCommentRequest>>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .student_comment(
            &req,
            student_id.into_inner(),
            body.map(|b| b.into_inner()).unwrap_or_default(),
        )
        .await
}

pub async fn teacher_summary(
    req: HttpRequest,
    teacher_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .teacher_summary(&req, teacher_id.into_inner())
        .await
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route(
                "/students/{student_id}",
                web::post()
                    .to(student_comment)
                    .wrap(middlewares::RateLimit::text_generation()),
            )
            .route(
                "/teachers/{teacher_id}",
                web::post()
                    .to(teacher_summary)
                    .wrap(middlewares::RateLimit::text_generation()),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::routes::test_support::{authed_app_storage, bearer};
    use crate::services::reports::{ReportCommentGenerator, TextGenerator};
    use crate::storage::Storage;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct EchoGenerator;

    #[async_trait::async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<Option<String>> {
            Ok(Some(format!("echo: {}", prompt.len())))
        }
    }

    #[actix_web::test]
    async fn test_student_comment() {
        let (storage, token) = authed_app_storage().await;
        let students = storage.list_students().await.unwrap();
        let student_id = students[0].student.id.clone();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(ReportCommentGenerator::new(
                    Arc::new(EchoGenerator),
                    "test-model",
                )))
                .configure(configure_report_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/reports/students/{student_id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"context": "Very helpful in class"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["student_id"], student_id.as_str());
        assert!(body["data"]["comment"].as_str().unwrap().starts_with("echo: "));

        let req = test::TestRequest::post()
            .uri("/api/v1/reports/students/missing")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
