//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolAdminError};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, UpdateSubjectRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let rows = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_by_id_impl(&self, id: &str) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(req.name),
            code: Set(req.code),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn update_subject_impl(
        &self,
        id: &str,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = Subjects::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_subject()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新科目失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: &str) -> Result<bool> {
        let result = Subjects::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
