use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CollectionService, entity_not_found, parse_collection, storage_error};
use crate::models::{ApiResponse, ErrorCode, collections::UpdatePayload};

pub async fn update_entity(
    service: &CollectionService,
    request: &HttpRequest,
    collection: String,
    id: String,
    body: serde_json::Value,
) -> ActixResult<HttpResponse> {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    let payload = match UpdatePayload::from_json(collection, body) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request);
    match storage.update_entity(&id, payload).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Record updated successfully",
        ))),
        Ok(None) => Ok(entity_not_found(collection, &id)),
        Err(e) => Ok(storage_error(
            &format!("Updating {collection}/{id}"),
            ErrorCode::EntityUpdateFailed,
            &e,
        )),
    }
}
