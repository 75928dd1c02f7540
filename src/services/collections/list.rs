use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CollectionService, parse_collection, storage_error};
use crate::models::{ApiResponse, ErrorCode, collections::EntityList};
use crate::services::students::search::filter_students;

pub async fn list_entities(
    service: &CollectionService,
    request: &HttpRequest,
    collection: String,
    search: Option<String>,
) -> ActixResult<HttpResponse> {
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_entities(collection).await {
        Ok(list) => {
            // 仅学生列表支持搜索
            let list = match (list, search.as_deref()) {
                (EntityList::Students(students), Some(term)) => {
                    EntityList::Students(filter_students(students, term))
                }
                (list, _) => list,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                list,
                format!("{collection} retrieved successfully"),
            )))
        }
        Err(e) => Ok(storage_error(
            &format!("Listing {collection}"),
            ErrorCode::InternalServerError,
            &e,
        )),
    }
}
