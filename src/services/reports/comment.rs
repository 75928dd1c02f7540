use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{
    ApiResponse, ErrorCode,
    reports::{
        requests::ReportCommentRequest,
        responses::{ProfileSummaryResponse, ReportCommentResponse},
    },
};

pub async fn handle_student_comment(
    service: &ReportService,
    request: &HttpRequest,
    student_id: String,
    body: ReportCommentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(&student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EntityNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load student {student_id}: {e}");
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load student",
                )),
            );
        }
    };

    let comment = service
        .get_generator(request)
        .student_report_comment(&student, body.context.as_deref())
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ReportCommentResponse {
            student_id: student.id,
            comment,
        },
        "Report comment generated",
    )))
}

pub async fn handle_teacher_summary(
    service: &ReportService,
    request: &HttpRequest,
    teacher_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(&teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EntityNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load teacher {teacher_id}: {e}");
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load teacher",
                )),
            );
        }
    };

    let summary = service
        .get_generator(request)
        .teacher_profile_summary(&teacher)
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProfileSummaryResponse {
            teacher_id: teacher.id,
            summary,
        },
        "Profile summary generated",
    )))
}
