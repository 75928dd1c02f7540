//! 管理员存储操作

use super::SeaOrmStorage;
use crate::entity::admin_users::{ActiveModel, Column, Entity as AdminUsers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::admin_users::entities::AdminUser;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 通过用户名获取管理员
    pub async fn get_admin_user_by_username_impl(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>> {
        let result = AdminUsers::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin_user()))
    }

    pub async fn get_admin_user_by_id_impl(&self, id: &str) -> Result<Option<AdminUser>> {
        let result = AdminUsers::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin_user()))
    }

    pub async fn count_admin_users_impl(&self) -> Result<u64> {
        AdminUsers::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计管理员失败: {e}")))
    }

    /// 创建管理员（用户名唯一约束由数据库保证）
    pub async fn create_admin_user_impl(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminUser> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建管理员失败: {e}")))?;

        Ok(result.into_admin_user())
    }
}
