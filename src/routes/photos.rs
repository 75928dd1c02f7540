use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::PhotoService;

// 懒加载的全局 PhotoService 实例
static PHOTO_SERVICE: Lazy<PhotoService> = Lazy::new(PhotoService::new_lazy);

pub async fn upload_photo(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    PHOTO_SERVICE.upload(&request, payload).await
}

pub async fn serve_photo(
    request: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    PHOTO_SERVICE.serve(&request, path.into_inner()).await
}

// 配置路由：上传需登录，读取公开（供 <img> 直接引用）
pub fn configure_photo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/photos")
            .wrap(middleware::Compress::default())
            .service(
                web::resource("")
                    .wrap(middlewares::RequireJWT)
                    .route(
                        web::post()
                            .to(upload_photo)
                            .wrap(middlewares::RateLimit::photo_upload()),
                    ),
            )
            .route("/{path:.*}", web::get().to(serve_photo)),
    );
}
