use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，返回后服务器停止接收新请求
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping SchoolAdmin Pro...");
}
