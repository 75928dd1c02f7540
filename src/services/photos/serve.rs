use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PhotoService;
use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::detect_image_type;

pub async fn handle_serve(
    service: &PhotoService,
    request: &HttpRequest,
    path: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.read_photo(&path).await {
        Ok(Some(bytes)) => {
            let mime = detect_image_type(&bytes).unwrap_or("application/octet-stream");
            Ok(HttpResponse::Ok()
                .content_type(mime)
                .insert_header(("Cache-Control", "public, max-age=86400"))
                .body(bytes))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Photo not found",
        ))),
        Err(SchoolAdminError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))),
        Err(e) => {
            tracing::error!("Reading photo {path} failed: {e}");
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Reading photo failed",
                )),
            )
        }
    }
}
