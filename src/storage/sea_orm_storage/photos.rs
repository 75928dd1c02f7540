//! 照片存储桶（本地目录）

use std::fs;
use std::path::PathBuf;

use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::photos::PHOTO_BUCKET;
use crate::utils::validate::validate_photo_path;

impl SeaOrmStorage {
    fn photo_file_path(&self, path: &str) -> Result<PathBuf> {
        validate_photo_path(path)?;
        Ok(self.upload_dir.join(PHOTO_BUCKET).join(path))
    }

    /// 写入存储桶，返回桶内相对路径
    pub fn upload_photo_impl(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let file_path = self.photo_file_path(path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, &bytes)?;

        tracing::debug!(
            "照片已保存: {} ({}, {} bytes)",
            path,
            content_type,
            bytes.len()
        );
        Ok(path.to_string())
    }

    pub fn read_photo_impl(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let file_path = self.photo_file_path(path)?;
        if !file_path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read(&file_path)?))
    }

    pub fn delete_photo_impl(&self, path: &str) -> Result<bool> {
        let file_path = self.photo_file_path(path)?;
        if !file_path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&file_path)?;
        tracing::debug!("照片已删除: {}", path);
        Ok(true)
    }
}
