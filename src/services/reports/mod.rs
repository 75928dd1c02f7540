pub mod comment;
pub mod generator;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::{Arc, OnceLock};

use crate::config::AppConfig;
use crate::models::reports::requests::ReportCommentRequest;
use crate::storage::Storage;

pub use generator::{
    GeminiGenerator, ReportCommentGenerator, TextGenerator, UnconfiguredGenerator,
};

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
    generator: OnceLock<Arc<ReportCommentGenerator>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            generator: OnceLock::new(),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// app_data 中注册的生成器优先，否则按配置构建一次
    pub(crate) fn get_generator(&self, request: &HttpRequest) -> Arc<ReportCommentGenerator> {
        if let Some(generator) = request.app_data::<web::Data<ReportCommentGenerator>>() {
            return generator.clone().into_inner();
        }
        self.generator
            .get_or_init(|| Arc::new(ReportCommentGenerator::from_config(&AppConfig::get().ai)))
            .clone()
    }

    // 学生评语
    pub async fn student_comment(
        &self,
        request: &HttpRequest,
        student_id: String,
        body: ReportCommentRequest,
    ) -> ActixResult<HttpResponse> {
        comment::handle_student_comment(self, request, student_id, body).await
    }

    // 教师简介
    pub async fn teacher_summary(
        &self,
        request: &HttpRequest,
        teacher_id: String,
    ) -> ActixResult<HttpResponse> {
        comment::handle_teacher_summary(self, request, teacher_id).await
    }
}
