//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::students::{
    entities::{Student, StudentWithClass},
    requests::{CreateStudentRequest, UpdateStudentRequest},
};
use crate::storage::photos::photo_url;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

// 可空列更新：空字符串表示置空
pub(super) fn nullable(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl SeaOrmStorage {
    /// 列出学生，连表取班级标签
    pub async fn list_students_impl(&self) -> Result<Vec<StudentWithClass>> {
        let rows = Students::find()
            .find_also_related(Classes)
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(student, class)| {
                let student = student.into_student();
                StudentWithClass {
                    class_label: class.map(|c| c.into_class().label()),
                    photo_url: photo_url(&self.public_base_url, student.photo_path.as_deref()),
                    student,
                }
            })
            .collect())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: &str) -> Result<Option<Student>> {
        let result = Students::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            admission_no: Set(req.admission_no),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            dob: Set(req.dob),
            gender: Set(req.gender.to_string()),
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            roll_no: Set(req.roll_no),
            photo_path: Set(req.photo_path),
            notes: Set(req.notes),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();

        if let Some(admission_no) = update.admission_no {
            model.admission_no = Set(admission_no);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(dob) = update.dob {
            model.dob = Set(dob);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(roll_no) = update.roll_no {
            model.roll_no = Set(roll_no);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(nullable(class_id));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(nullable(teacher_id));
        }
        if let Some(photo_path) = update.photo_path {
            model.photo_path = Set(nullable(photo_path));
        }
        if let Some(notes) = update.notes {
            model.notes = Set(nullable(notes));
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_student()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: &str) -> Result<bool> {
        let result = Students::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
