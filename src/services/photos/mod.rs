pub mod serve;
pub mod upload;

use actix_multipart::Field;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::stream::StreamExt;
use std::sync::Arc;

use crate::capture::CapturedPhoto;
use crate::config::UploadConfig;
use crate::errors::{Result, SchoolAdminError};
use crate::storage::Storage;
use crate::utils::{extension_of, image_mime_type, validate_magic_bytes};

pub struct PhotoService {
    storage: Option<Arc<dyn Storage>>,
}

impl PhotoService {
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

    // 上传照片
    pub async fn upload(
        &self,
        request: &HttpRequest,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    // 读取照片
    pub async fn serve(&self, request: &HttpRequest, path: String) -> ActixResult<HttpResponse> {
        serve::handle_serve(self, request, path).await
    }
}

/// 待上传的照片文件
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl From<CapturedPhoto> for PhotoFile {
    fn from(photo: CapturedPhoto) -> Self {
        Self {
            file_name: photo.file_name,
            content_type: photo.content_type,
            bytes: photo.bytes,
        }
    }
}

impl PhotoFile {
    /// 校验扩展名、大小与魔术字节
    pub fn validate(&self, config: &UploadConfig) -> Result<()> {
        let extension = extension_of(&self.file_name);
        if !config
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension)
        {
            return Err(SchoolAdminError::validation(format!(
                "File type not allowed: {}",
                self.file_name
            )));
        }
        if self.bytes.len() > config.max_size {
            return Err(SchoolAdminError::validation("File size exceeds the limit"));
        }
        if !validate_magic_bytes(&self.bytes, &extension) {
            return Err(SchoolAdminError::validation(
                "File content does not match its extension",
            ));
        }
        Ok(())
    }

    /// 按扩展名确定的 MIME 类型，不采用客户端声明的 Content-Type
    pub fn mime_type(&self) -> &'static str {
        image_mime_type(&extension_of(&self.file_name)).unwrap_or("application/octet-stream")
    }

    /// 存储桶内路径：`{folder}/{毫秒时间戳}_{文件名}`
    pub fn storage_path(&self, folder: &str) -> String {
        format!(
            "{}/{}_{}",
            folder,
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(&self.file_name)
        )
    }
}

// 文件名只保留字母数字与 . - _
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned.to_string()
    }
}

/// 读取 multipart 文件字段，超过上限立即中止
pub(crate) async fn read_file_field(field: &mut Field, max_size: usize) -> Result<PhotoFile> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|s| s.to_string())
        .unwrap_or_default();
    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| SchoolAdminError::file_operation(e.to_string()))?;
        if bytes.len() + data.len() > max_size {
            return Err(SchoolAdminError::validation("File size exceeds the limit"));
        }
        bytes.extend_from_slice(&data);
    }

    Ok(PhotoFile {
        file_name,
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    fn photo(name: &str, bytes: &[u8]) -> PhotoFile {
        PhotoFile {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("john doe.jpg"), "john_doe.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\me.png"), "me.png");
        assert_eq!(sanitize_file_name(".."), "photo");
    }

    #[test]
    fn test_storage_path_layout() {
        let path = photo("me.jpg", &JPEG).storage_path("students");
        let rest = path.strip_prefix("students/").unwrap();
        let (millis, name) = rest.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(name, "me.jpg");
        assert!(crate::utils::validate::validate_photo_path(&path).is_ok());
    }

    #[test]
    fn test_validate_photo() {
        let config = UploadConfig::default();
        assert!(photo("me.jpg", &JPEG).validate(&config).is_ok());
        assert!(photo("me.png", &JPEG).validate(&config).is_err());
        assert!(photo("me.exe", &JPEG).validate(&config).is_err());

        let small = UploadConfig {
            max_size: 2,
            ..UploadConfig::default()
        };
        assert!(photo("me.jpg", &JPEG).validate(&small).is_err());
    }

    #[test]
    fn test_mime_type_ignores_declared_content_type() {
        let mut file = photo("me.jpg", &JPEG);
        file.content_type = "text/html".to_string();
        assert!(file.validate(&UploadConfig::default()).is_ok());
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(photo("me", &JPEG).mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_captured_photo_converts() {
        let file = PhotoFile::from(CapturedPhoto::new(JPEG.to_vec()));
        assert_eq!(file.content_type, "image/jpeg");
        assert!(file.validate(&UploadConfig::default()).is_ok());
    }
}
