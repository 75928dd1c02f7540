pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode, collections::Collection};
use crate::storage::Storage;

/// `/api/v1/{collection}` 通用增删改查
pub struct CollectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl CollectionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        collection: String,
        search: Option<String>,
    ) -> ActixResult<HttpResponse> {
        list::list_entities(self, request, collection, search).await
    }

    pub async fn get(
        &self,
        request: &HttpRequest,
        collection: String,
        id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_entity(self, request, collection, id).await
    }

    pub async fn create(
        &self,
        request: &HttpRequest,
        collection: String,
        body: serde_json::Value,
    ) -> ActixResult<HttpResponse> {
        create::create_entity(self, request, collection, body).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        collection: String,
        id: String,
        body: serde_json::Value,
    ) -> ActixResult<HttpResponse> {
        update::update_entity(self, request, collection, id, body).await
    }

    pub async fn delete(
        &self,
        request: &HttpRequest,
        collection: String,
        id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_entity(self, request, collection, id).await
    }
}

/// 解析集合名，未知集合返回 404
pub(crate) fn parse_collection(name: &str) -> Result<Collection, HttpResponse> {
    name.parse::<Collection>().map_err(|e| {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollectionNotFound,
            e.message(),
        ))
    })
}

pub(crate) fn entity_not_found(collection: Collection, id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::EntityNotFound,
        format!("No record with id {id} in {collection}"),
    ))
}

/// 存储错误转为响应：校验失败 400，其余记录日志后返回 500
pub(crate) fn storage_error(action: &str, code: ErrorCode, e: &SchoolAdminError) -> HttpResponse {
    match e {
        SchoolAdminError::Validation(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.clone()),
        ),
        SchoolAdminError::UnknownCollection(msg) => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::CollectionNotFound, msg.clone()),
        ),
        _ => {
            error!("{action} failed: {e}");
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(code, format!("{action} failed")))
        }
    }
}
