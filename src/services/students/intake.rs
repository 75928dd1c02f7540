//! 新增学生（表单 + 可选照片）

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::StudentService;
use crate::config::{AppConfig, UploadConfig};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{entities::Student, requests::CreateStudentRequest},
};
use crate::services::photos::{PhotoFile, read_file_field};
use crate::storage::Storage;

/// 学生照片在存储桶中的目录
pub const STUDENT_PHOTO_FOLDER: &str = "students";

// 表单文本字段上限
const MAX_TEXT_FIELD: usize = 8 * 1024;

pub async fn handle_intake(
    service: &StudentService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().upload;
    let mut fields = HashMap::new();
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

        let parsed = if name == "photo" {
            read_file_field(&mut field, config.max_size)
                .await
                .map(|file| {
                    // 未选择文件时浏览器仍会提交空字段
                    if !file.bytes.is_empty() {
                        photo = Some(file);
                    }
                })
        } else {
            read_text_field(&mut field).await.map(|value| {
                fields.insert(name, value);
            })
        };

        if let Err(e) = parsed {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )));
        }
    }

    let storage = service.get_storage(request);
    match intake_student(storage.as_ref(), config, fields, photo).await {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(
            student,
            "Student added successfully",
        ))),
        Err(SchoolAdminError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))),
        Err(e) => {
            tracing::error!("Student intake failed: {e}");
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EntityCreationFailed,
                    "Creating student failed",
                )),
            )
        }
    }
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| SchoolAdminError::file_operation(e.to_string()))?;
        if bytes.len() + data.len() > MAX_TEXT_FIELD {
            return Err(SchoolAdminError::validation("Form field is too large"));
        }
        bytes.extend_from_slice(&data);
    }
    String::from_utf8(bytes).map_err(|_| SchoolAdminError::validation("Form field is not UTF-8"))
}

/// 创建学生；照片上传失败时记录日志并继续创建（不带照片）
///
/// 表单先于照片校验，学生写入失败时删除已上传的照片。
pub async fn intake_student(
    storage: &dyn Storage,
    config: &UploadConfig,
    fields: HashMap<String, String>,
    photo: Option<PhotoFile>,
) -> Result<Student> {
    let form = serde_json::Map::from_iter(
        fields
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v))),
    );
    let student: CreateStudentRequest = serde_json::from_value(form.into())
        .map_err(|e| SchoolAdminError::validation(e.to_string()))?;
    let mut student = student.validate()?;

    let mut uploaded = None;
    if let Some(photo) = photo {
        photo.validate(config)?;
        let path = photo.storage_path(STUDENT_PHOTO_FOLDER);
        match storage
            .upload_photo(&path, photo.mime_type(), photo.bytes)
            .await
        {
            Ok(reference) => {
                student.photo_path = Some(reference.clone());
                uploaded = Some(reference);
            }
            Err(e) => warn!("Photo upload failed, creating student without photo: {e}"),
        }
    }

    let student = match storage.create_student(student).await {
        Ok(student) => student,
        Err(e) => {
            if let Some(reference) = uploaded {
                discard_photo(storage, &reference).await;
            }
            return Err(e);
        }
    };
    info!(
        "Added student {} ({})",
        student.full_name(),
        student.admission_no
    );
    Ok(student)
}

async fn discard_photo(storage: &dyn Storage, reference: &str) {
    match storage.delete_photo(reference).await {
        Ok(_) => debug!("Discarded photo {reference} after failed student insert"),
        Err(e) => warn!("Orphaned photo {reference} could not be removed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CapturedPhoto;
    use crate::storage::memory_storage::MemoryStorage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::path::{Path, PathBuf};

    const BASE: &str = "http://127.0.0.1:8080/api/v1/photos";
    const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    struct TempDir(PathBuf);

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    // upload_dir 相对 root，返回落盘存储
    async fn disk_storage(upload_dir: &str) -> (SeaOrmStorage, TempDir) {
        let root = std::env::temp_dir().join(format!("schooladmin-intake-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        let url = format!("sqlite://{}?mode=rwc", root.join("school.db").display());
        let storage = SeaOrmStorage::connect(&url, 1, 5, root.join(upload_dir).to_str().unwrap(), BASE)
            .await
            .unwrap();
        (storage, TempDir(root))
    }

    fn stored_photos(root: &Path) -> usize {
        std::fs::read_dir(root.join("uploads/photos/students"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    fn jpeg() -> PhotoFile {
        PhotoFile {
            file_name: "a.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: JPEG.to_vec(),
        }
    }

    fn form() -> HashMap<String, String> {
        HashMap::from([
            ("admission_no".to_string(), "ADM010".to_string()),
            ("first_name".to_string(), "Ada".to_string()),
            ("last_name".to_string(), "Lovelace".to_string()),
            ("dob".to_string(), "2014-12-10".to_string()),
            ("gender".to_string(), "Female".to_string()),
            ("class_id".to_string(), String::new()),
            ("roll_no".to_string(), "7".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_intake_without_photo() {
        let storage = MemoryStorage::new(BASE);
        let student = intake_student(&storage, &UploadConfig::default(), form(), None)
            .await
            .unwrap();
        assert_eq!(student.last_name, "Lovelace");
        assert_eq!(student.class_id, None);
        assert_eq!(student.photo_path, None);
        assert!(storage.get_student_by_id(&student.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_intake_with_captured_photo_in_demo_mode() {
        let storage = MemoryStorage::new(BASE);
        let photo = PhotoFile::from(CapturedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xE0]));
        let student = intake_student(&storage, &UploadConfig::default(), form(), Some(photo))
            .await
            .unwrap();
        let path = student.photo_path.unwrap();
        assert!(path.starts_with("data:image/jpeg;base64,"));
        assert_eq!(storage.public_url(&path), path);
    }

    #[tokio::test]
    async fn test_intake_rejects_missing_fields() {
        let storage = MemoryStorage::new(BASE);
        let mut fields = form();
        fields.remove("last_name");
        let err = intake_student(&storage, &UploadConfig::default(), fields, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolAdminError::Validation(_)));
        assert!(storage.list_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_intake_rejects_spoofed_photo() {
        let storage = MemoryStorage::new(BASE);
        let photo = PhotoFile {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"not an image".to_vec(),
        };
        let err = intake_student(&storage, &UploadConfig::default(), form(), Some(photo))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolAdminError::Validation(_)));
    }

    #[tokio::test]
    async fn test_intake_stores_photo_on_disk() {
        let (storage, dir) = disk_storage("uploads").await;
        let student = intake_student(&storage, &UploadConfig::default(), form(), Some(jpeg()))
            .await
            .unwrap();
        let path = student.photo_path.unwrap();
        assert!(path.starts_with("students/"));
        assert_eq!(storage.read_photo(&path).await.unwrap(), Some(JPEG.to_vec()));
        assert_eq!(stored_photos(&dir.0), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_uploads_nothing() {
        let (storage, dir) = disk_storage("uploads").await;
        let mut fields = form();
        fields.insert("dob".to_string(), "10/12/2015".to_string());
        let err = intake_student(&storage, &UploadConfig::default(), fields, Some(jpeg()))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolAdminError::Validation(_)));
        assert!(storage.list_students().await.unwrap().is_empty());
        assert_eq!(stored_photos(&dir.0), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_uploaded_photo() {
        let (storage, dir) = disk_storage("uploads").await;
        let mut fields = form();
        // 外键约束：班级不存在
        fields.insert("class_id".to_string(), "missing-class".to_string());
        assert!(
            intake_student(&storage, &UploadConfig::default(), fields, Some(jpeg()))
                .await
                .is_err()
        );
        assert!(storage.list_students().await.unwrap().is_empty());
        assert_eq!(stored_photos(&dir.0), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_still_creates_student() {
        let (storage, dir) = disk_storage("blocked").await;
        // 上传目录被普通文件占用，写入照片必然失败
        std::fs::write(dir.0.join("blocked"), b"").unwrap();

        let student = intake_student(&storage, &UploadConfig::default(), form(), Some(jpeg()))
            .await
            .unwrap();
        assert_eq!(student.photo_path, None);
        let stored = storage.get_student_by_id(&student.id).await.unwrap().unwrap();
        assert_eq!(stored.photo_path, None);
    }

    #[tokio::test]
    async fn test_demo_data_uri_uses_extension_mime() {
        let storage = MemoryStorage::new(BASE);
        let mut photo = jpeg();
        photo.content_type = "text/html".to_string();
        let student = intake_student(&storage, &UploadConfig::default(), form(), Some(photo))
            .await
            .unwrap();
        assert!(student.photo_path.unwrap().starts_with("data:image/jpeg;base64,"));
    }
}
