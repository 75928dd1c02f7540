//! 摄像头采集
//!
//! 状态机：Closed → RequestingDevice → Streaming → (拍摄 | 取消) → Closed。
//! 已获取的媒体流由 [`StreamGuard`] 持有，拍摄、取消、析构时各释放一次。

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::{Result, SchoolAdminError};

/// 采集照片的文件类型
pub const CAPTURE_CONTENT_TYPE: &str = "image/jpeg";

/// 媒体设备（摄像头）
#[async_trait]
pub trait MediaDevice: Send + Sync {
    /// 请求视频流
    async fn open_stream(&self) -> Result<Box<dyn MediaStream>>;
}

/// 已打开的媒体流
pub trait MediaStream: Send {
    /// 抓取当前帧（JPEG 编码）
    fn capture_frame(&mut self) -> Result<Vec<u8>>;
    /// 停止所有轨道
    fn stop_tracks(&mut self);
}

/// 媒体流守卫，保证轨道只停止一次
pub struct StreamGuard {
    stream: Option<Box<dyn MediaStream>>,
}

impl StreamGuard {
    pub fn new(stream: Box<dyn MediaStream>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    fn stream_mut(&mut self) -> Option<&mut Box<dyn MediaStream>> {
        self.stream.as_mut()
    }

    /// 释放媒体流，未持有时为空操作
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            debug!("Camera stream released");
        }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Closed,
    RequestingDevice,
    Streaming,
}

/// 拍摄得到的照片
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CapturedPhoto {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("camera_{}.jpg", chrono::Utc::now().timestamp_millis()),
            content_type: CAPTURE_CONTENT_TYPE.to_string(),
            bytes,
        }
    }
}

/// 一次摄像头采集会话
pub struct CameraCapture<D: MediaDevice> {
    device: D,
    state: CaptureState,
    guard: Option<StreamGuard>,
}

impl<D: MediaDevice> CameraCapture<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            state: CaptureState::Closed,
            guard: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// 打开摄像头；失败时会话回到 Closed
    pub async fn open(&mut self) -> Result<()> {
        if self.state == CaptureState::Streaming {
            return Ok(());
        }

        self.state = CaptureState::RequestingDevice;
        match self.device.open_stream().await {
            Ok(stream) => {
                self.guard = Some(StreamGuard::new(stream));
                self.state = CaptureState::Streaming;
                Ok(())
            }
            Err(e) => {
                warn!("Could not access camera: {e}");
                self.state = CaptureState::Closed;
                Err(SchoolAdminError::media_device(format!(
                    "Could not access camera: {}",
                    e.message()
                )))
            }
        }
    }

    /// 拍摄一帧并关闭会话
    pub fn capture(&mut self) -> Result<CapturedPhoto> {
        let frame = match self.guard.as_mut().and_then(|g| g.stream_mut()) {
            Some(stream) => stream.capture_frame(),
            None => Err(SchoolAdminError::media_device("Camera is not streaming")),
        };
        self.close();
        frame.map(CapturedPhoto::new)
    }

    /// 取消拍摄
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Some(mut guard) = self.guard.take() {
            guard.release();
        }
        self.state = CaptureState::Closed;
    }
}
