//! 班级存储操作

use super::SeaOrmStorage;
use super::students::nullable;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::teachers::Entity as Teachers;
use crate::errors::{Result, SchoolAdminError};
use crate::models::classes::{
    entities::{Class, ClassWithTeacher},
    requests::{CreateClassRequest, UpdateClassRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出班级，连表取班主任姓名
    pub async fn list_classes_impl(&self) -> Result<Vec<ClassWithTeacher>> {
        let rows = Classes::find()
            .find_also_related(Teachers)
            .order_by_asc(Column::Grade)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(class, teacher)| ClassWithTeacher {
                class: class.into_class(),
                teacher_name: teacher.map(|t| t.full_name),
            })
            .collect())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, id: &str) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            grade: Set(req.grade),
            section: Set(req.section),
            academic_year: Set(req.academic_year),
            class_teacher_id: Set(req.class_teacher_id),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        id: &str,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();

        if let Some(grade) = update.grade {
            model.grade = Set(grade);
        }
        if let Some(section) = update.section {
            model.section = Set(section);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(class_teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(nullable(class_teacher_id));
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_class()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, id: &str) -> Result<bool> {
        let result = Classes::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
