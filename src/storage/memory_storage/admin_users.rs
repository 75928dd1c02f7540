//! 管理员内存操作

use super::{MemoryStorage, new_id, read, write};
use crate::errors::{Result, SchoolAdminError};
use crate::models::admin_users::entities::AdminUser;

impl MemoryStorage {
    pub(super) fn get_admin_user_by_username_impl(&self, username: &str) -> Option<AdminUser> {
        read(&self.admin_users)
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub(super) fn get_admin_user_by_id_impl(&self, id: &str) -> Option<AdminUser> {
        read(&self.admin_users).iter().find(|u| u.id == id).cloned()
    }

    /// 创建管理员，用户名唯一
    pub(super) fn create_admin_user_impl(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminUser> {
        let mut users = write(&self.admin_users);
        if users.iter().any(|u| u.username == username) {
            return Err(SchoolAdminError::validation(format!(
                "Admin user already exists: {username}"
            )));
        }
        let user = AdminUser {
            id: new_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
