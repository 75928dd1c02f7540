use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode, dashboard::responses::DashboardStats};
use crate::storage::Storage;

pub async fn handle_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match collect_stats(storage.as_ref()).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard statistics retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to load dashboard statistics: {e}");
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load dashboard statistics",
                )),
            )
        }
    }
}

/// 并发读取三个列表并计数，任一失败即整体失败
pub async fn collect_stats(storage: &dyn Storage) -> Result<DashboardStats> {
    let (students, teachers, classes) = tokio::try_join!(
        storage.list_students(),
        storage.list_teachers(),
        storage.list_classes(),
    )?;

    Ok(DashboardStats {
        students: students.len() as u32,
        teachers: teachers.len() as u32,
        classes: classes.len() as u32,
        mode: storage.mode().to_string(),
    })
}
