//! 初始管理员账号

use tracing::{info, warn};

use crate::errors::Result;
use crate::storage::{Storage, StorageMode};
use crate::utils::password::{generate_password, hash_password};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEMO_ADMIN_PASSWORD: &str = "admin123";

/// 无管理员时创建 `admin`
///
/// 密码取 `ADMIN_PASSWORD`；未设置时演示模式用 `admin123`，
/// 真实模式生成随机密码并仅在日志中输出一次。返回是否新建了账号。
pub async fn ensure_admin_user(storage: &dyn Storage) -> Result<bool> {
    if storage.count_admin_users().await? > 0 {
        return Ok(false);
    }

    let configured = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.trim().is_empty());
    let password = match (configured, storage.mode()) {
        (Some(password), _) => password,
        (None, StorageMode::Demo) => DEMO_ADMIN_PASSWORD.to_string(),
        (None, StorageMode::Live) => {
            let password = generate_password(16);
            warn!(
                "Created admin account '{}' with generated password: {}",
                DEFAULT_ADMIN_USERNAME, password
            );
            password
        }
    };

    let hash = hash_password(&password)?;
    storage
        .create_admin_user(DEFAULT_ADMIN_USERNAME, &hash)
        .await?;
    info!("Admin account '{}' initialized", DEFAULT_ADMIN_USERNAME);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::MemoryStorage;
    use crate::utils::password::verify_password;

    #[tokio::test]
    async fn test_seeds_once() {
        let storage = MemoryStorage::seeded("http://localhost/photos");
        assert!(ensure_admin_user(&storage).await.unwrap());
        assert!(!ensure_admin_user(&storage).await.unwrap());
        assert_eq!(storage.count_admin_users().await.unwrap(), 1);

        let admin = storage
            .get_admin_user_by_username(DEFAULT_ADMIN_USERNAME)
            .await
            .unwrap()
            .unwrap();
        if std::env::var("ADMIN_PASSWORD").is_err() {
            assert!(verify_password(DEMO_ADMIN_PASSWORD, &admin.password_hash));
        }
    }
}
