//! 教师存储操作

use super::SeaOrmStorage;
use super::students::nullable;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::teachers::{
    entities::{Teacher, TeacherView},
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use crate::storage::photos::photo_url;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出教师（按姓名排序）
    pub async fn list_teachers_impl(&self) -> Result<Vec<TeacherView>> {
        let rows = Teachers::find()
            .order_by_asc(Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let teacher = m.into_teacher();
                TeacherView {
                    photo_url: photo_url(&self.public_base_url, teacher.photo_path.as_deref()),
                    teacher,
                }
            })
            .collect())
    }

    pub async fn get_teacher_by_id_impl(&self, id: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            teacher_no: Set(req.teacher_no),
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            email: Set(req.email),
            qualifications: Set(req.qualifications),
            hire_date: Set(req.hire_date),
            photo_path: Set(req.photo_path),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    pub async fn update_teacher_impl(
        &self,
        id: &str,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();

        if let Some(teacher_no) = update.teacher_no {
            model.teacher_no = Set(teacher_no);
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(qualifications) = update.qualifications {
            model.qualifications = Set(qualifications);
        }
        if let Some(hire_date) = update.hire_date {
            model.hire_date = Set(hire_date);
        }
        if let Some(photo_path) = update.photo_path {
            model.photo_path = Set(nullable(photo_path));
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_teacher()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    /// 删除教师，外键 ON DELETE SET NULL 清空引用
    pub async fn delete_teacher_impl(&self, id: &str) -> Result<bool> {
        let result = Teachers::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
