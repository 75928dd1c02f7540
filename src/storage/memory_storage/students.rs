//! 学生内存操作

use super::{MemoryStorage, new_id, read, remove_by_id, set_field, set_nullable, write};
use crate::models::students::{
    entities::{Student, StudentWithClass},
    requests::{CreateStudentRequest, UpdateStudentRequest},
};
use crate::storage::photos::photo_url;

impl MemoryStorage {
    /// 列出学生，逐条关联班级标签
    pub(super) fn list_students_impl(&self) -> Vec<StudentWithClass> {
        let classes = read(&self.classes);
        let mut students: Vec<StudentWithClass> = read(&self.students)
            .iter()
            .map(|s| {
                let class_label = s
                    .class_id
                    .as_deref()
                    .and_then(|id| classes.iter().find(|c| c.id == id))
                    .map(|c| c.label());
                StudentWithClass {
                    photo_url: photo_url(&self.public_base_url, s.photo_path.as_deref()),
                    class_label,
                    student: s.clone(),
                }
            })
            .collect();
        students.sort_by(|a, b| a.student.last_name.cmp(&b.student.last_name));
        students
    }

    pub(super) fn get_student_by_id_impl(&self, id: &str) -> Option<Student> {
        read(&self.students).iter().find(|s| s.id == id).cloned()
    }

    pub(super) fn create_student_impl(&self, req: CreateStudentRequest) -> Student {
        let student = Student {
            id: new_id(),
            admission_no: req.admission_no,
            first_name: req.first_name,
            last_name: req.last_name,
            dob: req.dob,
            gender: req.gender,
            class_id: req.class_id,
            teacher_id: req.teacher_id,
            roll_no: req.roll_no,
            photo_path: req.photo_path,
            notes: req.notes,
        };
        write(&self.students).push(student.clone());
        student
    }

    pub(super) fn update_student_impl(
        &self,
        id: &str,
        update: UpdateStudentRequest,
    ) -> Option<Student> {
        let mut students = write(&self.students);
        let student = students.iter_mut().find(|s| s.id == id)?;

        set_field(&mut student.admission_no, update.admission_no);
        set_field(&mut student.first_name, update.first_name);
        set_field(&mut student.last_name, update.last_name);
        set_field(&mut student.dob, update.dob);
        set_field(&mut student.gender, update.gender);
        set_field(&mut student.roll_no, update.roll_no);
        set_nullable(&mut student.class_id, update.class_id);
        set_nullable(&mut student.teacher_id, update.teacher_id);
        set_nullable(&mut student.photo_path, update.photo_path);
        set_nullable(&mut student.notes, update.notes);

        Some(student.clone())
    }

    pub(super) fn delete_student_impl(&self, id: &str) -> bool {
        remove_by_id(&mut write(&self.students), id, |s| s.id.as_str())
    }
}
