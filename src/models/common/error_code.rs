use serde::Serialize;

// API 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    AuthFailed = 1003,
    RateLimitExceeded = 1004,

    // 资源错误 2xxx
    NotFound = 2000,
    CollectionNotFound = 2001,
    EntityNotFound = 2002,
    EntityCreationFailed = 2003,
    EntityUpdateFailed = 2004,
    EntityDeleteFailed = 2005,

    // 文件错误 3xxx
    FileNotFound = 3000,
    FileTypeNotAllowed = 3001,
    FileSizeExceeded = 3002,
    FileUploadFailed = 3003,
    MultifileUploadNotAllowed = 3004,

    // 服务器错误 5xxx
    InternalServerError = 5000,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
