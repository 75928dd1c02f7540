use crate::services::auth::ensure_admin_user;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化管理员账号，失败不影响启动
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match ensure_admin_user(storage.as_ref()).await {
        Ok(true) => info!("Default admin account created"),
        Ok(false) => info!("Admin account already present, skipping seed"),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized in {} mode", storage.mode());

    seed_admin(&storage).await;

    StartupContext { storage }
}
