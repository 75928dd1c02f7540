//! 班级内存操作

use super::{MemoryStorage, new_id, read, remove_by_id, set_field, set_nullable, write};
use crate::models::classes::{
    entities::{Class, ClassWithTeacher},
    requests::{CreateClassRequest, UpdateClassRequest},
};

impl MemoryStorage {
    /// 列出班级，关联班主任姓名
    pub(super) fn list_classes_impl(&self) -> Vec<ClassWithTeacher> {
        let teachers = read(&self.teachers);
        let mut classes: Vec<ClassWithTeacher> = read(&self.classes)
            .iter()
            .map(|c| ClassWithTeacher {
                teacher_name: c
                    .class_teacher_id
                    .as_deref()
                    .and_then(|id| teachers.iter().find(|t| t.id == id))
                    .map(|t| t.full_name.clone()),
                class: c.clone(),
            })
            .collect();
        classes.sort_by(|a, b| a.class.grade.cmp(&b.class.grade));
        classes
    }

    pub(super) fn get_class_by_id_impl(&self, id: &str) -> Option<Class> {
        read(&self.classes).iter().find(|c| c.id == id).cloned()
    }

    pub(super) fn create_class_impl(&self, req: CreateClassRequest) -> Class {
        let class = Class {
            id: new_id(),
            grade: req.grade,
            section: req.section,
            academic_year: req.academic_year,
            class_teacher_id: req.class_teacher_id,
        };
        write(&self.classes).push(class.clone());
        class
    }

    pub(super) fn update_class_impl(&self, id: &str, update: UpdateClassRequest) -> Option<Class> {
        let mut classes = write(&self.classes);
        let class = classes.iter_mut().find(|c| c.id == id)?;

        set_field(&mut class.grade, update.grade);
        set_field(&mut class.section, update.section);
        set_field(&mut class.academic_year, update.academic_year);
        set_nullable(&mut class.class_teacher_id, update.class_teacher_id);

        Some(class.clone())
    }

    pub(super) fn delete_class_impl(&self, id: &str) -> bool {
        remove_by_id(&mut write(&self.classes), id, |c| c.id.as_str())
    }
}
