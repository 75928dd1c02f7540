//! 教师内存操作

use super::{MemoryStorage, new_id, read, remove_by_id, set_field, set_nullable, write};
use crate::models::teachers::{
    entities::{Teacher, TeacherView},
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use crate::storage::photos::photo_url;

impl MemoryStorage {
    pub(super) fn list_teachers_impl(&self) -> Vec<TeacherView> {
        let mut teachers: Vec<TeacherView> = read(&self.teachers)
            .iter()
            .map(|t| TeacherView {
                photo_url: photo_url(&self.public_base_url, t.photo_path.as_deref()),
                teacher: t.clone(),
            })
            .collect();
        teachers.sort_by(|a, b| a.teacher.full_name.cmp(&b.teacher.full_name));
        teachers
    }

    pub(super) fn get_teacher_by_id_impl(&self, id: &str) -> Option<Teacher> {
        read(&self.teachers).iter().find(|t| t.id == id).cloned()
    }

    pub(super) fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Teacher {
        let teacher = Teacher {
            id: new_id(),
            teacher_no: req.teacher_no,
            full_name: req.full_name,
            phone: req.phone,
            email: req.email,
            qualifications: req.qualifications,
            hire_date: req.hire_date,
            photo_path: req.photo_path,
        };
        write(&self.teachers).push(teacher.clone());
        teacher
    }

    pub(super) fn update_teacher_impl(
        &self,
        id: &str,
        update: UpdateTeacherRequest,
    ) -> Option<Teacher> {
        let mut teachers = write(&self.teachers);
        let teacher = teachers.iter_mut().find(|t| t.id == id)?;

        set_field(&mut teacher.teacher_no, update.teacher_no);
        set_field(&mut teacher.full_name, update.full_name);
        set_field(&mut teacher.phone, update.phone);
        set_field(&mut teacher.email, update.email);
        set_field(&mut teacher.qualifications, update.qualifications);
        set_field(&mut teacher.hire_date, update.hire_date);
        set_nullable(&mut teacher.photo_path, update.photo_path);

        Some(teacher.clone())
    }

    // 引用该教师的班级和学生保持原样，读取时关联为空
    pub(super) fn delete_teacher_impl(&self, id: &str) -> bool {
        remove_by_id(&mut write(&self.teachers), id, |t| t.id.as_str())
    }
}
