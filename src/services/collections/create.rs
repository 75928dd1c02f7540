use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CollectionService, parse_collection, storage_error};
use crate::models::{ApiResponse, ErrorCode, collections::CreatePayload};

pub async fn create_entity(
    service: &CollectionService,
    request: &HttpRequest,
    collection: String,
    body: serde_json::Value,
) -> ActixResult<HttpResponse> {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    let payload = match CreatePayload::from_json(collection, body) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);
    match storage.create_entity(payload).await {
        Ok(record) => {
            info!("Created {} record {}", collection, record.id());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Record created successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            &format!("Creating {collection} record"),
            ErrorCode::EntityCreationFailed,
            &e,
        )),
    }
}
