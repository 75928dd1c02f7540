use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;

use super::{PhotoService, read_file_field};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, photos::responses::PhotoUploadResponse};

pub async fn handle_upload(
    service: &PhotoService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().upload;
    let mut photo = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Malformed multipart payload: {e}"),
                )));
            }
        };

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if photo.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        match read_file_field(&mut field, config.max_size).await {
            Ok(file) => photo = Some(file),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    e.message(),
                )));
            }
        }
    }

    let Some(photo) = photo else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    if let Err(e) = photo.validate(config) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            e.message(),
        )));
    }

    let storage = service.get_storage(request);
    let path = photo.storage_path("uploads");
    match storage
        .upload_photo(&path, photo.mime_type(), photo.bytes)
        .await
    {
        Ok(reference) => {
            let url = storage.public_url(&reference);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PhotoUploadResponse {
                    path: reference,
                    url,
                },
                "Photo uploaded successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Photo upload failed: {e}");
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Photo upload failed",
                )),
            )
        }
    }
}
