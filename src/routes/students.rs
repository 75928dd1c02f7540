use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn intake_student(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.intake(&req, payload).await
}

// 配置路由（须在通用集合路由之前注册）
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/students/intake")
            .wrap(middlewares::RequireJWT)
            .route(
                web::post()
                    .to(intake_student)
                    .wrap(middlewares::RateLimit::photo_upload()),
            ),
    );
}
