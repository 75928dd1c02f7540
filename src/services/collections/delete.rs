use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CollectionService, entity_not_found, parse_collection, storage_error};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_entity(
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

    match storage.delete_entity(collection, &id).await {
        Ok(true) => {
            info!("Deleted {collection}/{id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Record deleted successfully")))
        }
        Ok(false) => Ok(entity_not_found(collection, &id)),
        Err(e) => Ok(storage_error(
            &format!("Deleting {collection}/{id}"),
            ErrorCode::EntityDeleteFailed,
            &e,
        )),
    }
}
