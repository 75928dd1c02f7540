use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CollectionService, entity_not_found, parse_collection, storage_error};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_entity(
    service: &CollectionService,
    request: &HttpRequest,
    collection: String,
    id: String,
) -> ActixResult<HttpResponse> {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_entity(collection, &id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Record retrieved successfully",
        ))),
        Ok(None) => Ok(entity_not_found(collection, &id)),
        Err(e) => Ok(storage_error(
            &format!("Fetching {collection}/{id}"),
            ErrorCode::InternalServerError,
            &e,
        )),
    }
}
