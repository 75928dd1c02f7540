/// 验证图片内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".png"）
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

const IMAGE_TYPES: [(&str, &str); 5] = [
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
];

/// 根据内容推断图片 MIME 类型
pub fn detect_image_type(data: &[u8]) -> Option<&'static str> {
    IMAGE_TYPES
        .into_iter()
        .find(|(ext, _)| validate_magic_bytes(data, ext))
        .map(|(_, mime)| mime)
}

/// 扩展名（含点号）对应的图片 MIME 类型
pub fn image_mime_type(extension: &str) -> Option<&'static str> {
    let extension = extension.to_lowercase();
    IMAGE_TYPES
        .into_iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| mime)
}

/// 提取小写扩展名（含点号），无扩展名返回空字符串
pub fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".png"));
    }

    #[test]
    fn test_webp_magic() {
        let webp = b"RIFF\x00\x00\x00\x00WEBPVP8 ";
        assert!(validate_magic_bytes(webp, ".webp"));
        assert!(!validate_magic_bytes(b"RIFF", ".webp"));
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(!validate_magic_bytes(b"%PDF-1.4", ".pdf"));
        assert!(!validate_magic_bytes(&[], ".png"));
    }

    #[test]
    fn test_detect_image_type() {
        assert_eq!(detect_image_type(&[0xFF, 0xD8, 0xFF, 0xDB]), Some("image/jpeg"));
        assert_eq!(detect_image_type(b"GIF89a...."), Some("image/gif"));
        assert_eq!(detect_image_type(b"hello"), None);
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type(".JPEG"), Some("image/jpeg"));
        assert_eq!(image_mime_type(".webp"), Some("image/webp"));
        assert_eq!(image_mime_type(".html"), None);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Photo.JPG"), ".jpg");
        assert_eq!(extension_of("camera_1.jpg"), ".jpg");
        assert_eq!(extension_of("noext"), "");
    }
}
