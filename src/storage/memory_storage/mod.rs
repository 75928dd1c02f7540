//! 内存存储实现（演示模式）
//!
//! 每个集合一把 `RwLock`，锁不跨越 `.await` 持有。

mod admin_users;
mod classes;
mod seed;
mod students;
mod subjects;
mod teachers;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::photos::{resolve_public_url, to_data_uri};
use super::{Storage, StorageMode};
use crate::errors::Result;
use crate::models::{
    admin_users::entities::AdminUser,
    classes::{
        entities::{Class, ClassWithTeacher},
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    students::{
        entities::{Student, StudentWithClass},
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, UpdateSubjectRequest},
    },
    teachers::{
        entities::{Teacher, TeacherView},
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
    },
};

pub struct MemoryStorage {
    students: RwLock<Vec<Student>>,
    teachers: RwLock<Vec<Teacher>>,
    classes: RwLock<Vec<Class>>,
    subjects: RwLock<Vec<Subject>>,
    admin_users: RwLock<Vec<AdminUser>>,
    public_base_url: String,
}

impl MemoryStorage {
    /// 空存储
    pub fn new(public_base_url: &str) -> Self {
        Self {
            students: RwLock::new(Vec::new()),
            teachers: RwLock::new(Vec::new()),
            classes: RwLock::new(Vec::new()),
            subjects: RwLock::new(Vec::new()),
            admin_users: RwLock::new(Vec::new()),
            public_base_url: public_base_url.to_string(),
        }
    }

    /// 预置示例数据的存储
    pub fn seeded(public_base_url: &str) -> Self {
        Self {
            students: RwLock::new(seed::students()),
            teachers: RwLock::new(seed::teachers()),
            classes: RwLock::new(seed::classes()),
            subjects: RwLock::new(Vec::new()),
            admin_users: RwLock::new(Vec::new()),
            public_base_url: public_base_url.to_string(),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().expect("memory storage lock poisoned")
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().expect("memory storage lock poisoned")
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// 可空字段更新：空字符串表示清空
fn set_nullable(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *target = if v.is_empty() { None } else { Some(v) };
    }
}

fn set_field<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

// 按 id 删除，返回是否删除了记录
fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}

#[async_trait]
impl Storage for MemoryStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Demo
    }

    // 学生模块
    async fn list_students(&self) -> Result<Vec<StudentWithClass>> {
        Ok(self.list_students_impl())
    }

    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        Ok(self.get_student_by_id_impl(id))
    }

    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        Ok(self.create_student_impl(student))
    }

    async fn update_student(
        &self,
        id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        Ok(self.update_student_impl(id, update))
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        Ok(self.delete_student_impl(id))
    }

    // 教师模块
    async fn list_teachers(&self) -> Result<Vec<TeacherView>> {
        Ok(self.list_teachers_impl())
    }

    async fn get_teacher_by_id(&self, id: &str) -> Result<Option<Teacher>> {
        Ok(self.get_teacher_by_id_impl(id))
    }

    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        Ok(self.create_teacher_impl(teacher))
    }

    async fn update_teacher(
        &self,
        id: &str,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        Ok(self.update_teacher_impl(id, update))
    }

    async fn delete_teacher(&self, id: &str) -> Result<bool> {
        Ok(self.delete_teacher_impl(id))
    }

    // 班级模块
    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>> {
        Ok(self.list_classes_impl())
    }

    async fn get_class_by_id(&self, id: &str) -> Result<Option<Class>> {
        Ok(self.get_class_by_id_impl(id))
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        Ok(self.create_class_impl(class))
    }

    async fn update_class(&self, id: &str, update: UpdateClassRequest) -> Result<Option<Class>> {
        Ok(self.update_class_impl(id, update))
    }

    async fn delete_class(&self, id: &str) -> Result<bool> {
        Ok(self.delete_class_impl(id))
    }

    // 科目模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.list_subjects_impl())
    }

    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>> {
        Ok(self.get_subject_by_id_impl(id))
    }

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        Ok(self.create_subject_impl(subject))
    }

    async fn update_subject(
        &self,
        id: &str,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        Ok(self.update_subject_impl(id, update))
    }

    async fn delete_subject(&self, id: &str) -> Result<bool> {
        Ok(self.delete_subject_impl(id))
    }

    // 管理员模块
    async fn get_admin_user_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        Ok(self.get_admin_user_by_username_impl(username))
    }

    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>> {
        Ok(self.get_admin_user_by_id_impl(id))
    }

    async fn count_admin_users(&self) -> Result<u64> {
        Ok(read(&self.admin_users).len() as u64)
    }

    async fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<AdminUser> {
        self.create_admin_user_impl(username, password_hash)
    }

    // 照片模块：不落盘，直接返回 data URI
    async fn upload_photo(
        &self,
        _path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        Ok(to_data_uri(content_type, &bytes))
    }

    async fn read_photo(&self, _path: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn delete_photo(&self, _path: &str) -> Result<bool> {
        Ok(false)
    }

    fn public_url(&self, path: &str) -> String {
        resolve_public_url(&self.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::collections::{Collection, CreatePayload, EntityList, UpdatePayload};
    use serde_json::json;

    const BASE: &str = "http://127.0.0.1:8080/api/v1/photos";

    fn storage() -> MemoryStorage {
        MemoryStorage::seeded(BASE)
    }

    fn student_payload(admission_no: &str, last_name: &str) -> CreatePayload {
        CreatePayload::from_json(
            Collection::Students,
            json!({
                "admission_no": admission_no,
                "first_name": "Test",
                "last_name": last_name,
                "dob": "2014-03-03",
                "gender": "Other",
                "class_id": "1"
            }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_seeded_lists_are_sorted_and_joined() {
        let storage = storage();

        let students = storage.list_students().await.unwrap();
        let names: Vec<_> = students.iter().map(|s| s.student.last_name.as_str()).collect();
        assert_eq!(names, vec!["Doe", "Smith"]);
        let label = students[0].class_label.as_ref().unwrap();
        assert_eq!((label.grade.as_str(), label.section.as_str()), ("5", "A"));

        let classes = storage.list_classes().await.unwrap();
        assert_eq!(classes[0].teacher_name.as_deref(), Some("Sarah Connor"));
        assert_eq!(classes[1].teacher_name.as_deref(), Some("James Logan"));

        let teachers = storage.list_teachers().await.unwrap();
        assert_eq!(teachers[0].teacher.full_name, "James Logan");

        assert!(storage.list_subjects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_fetch_includes_record_once() {
        let storage = storage();
        for collection in Collection::ALL {
            let payload = match collection {
                Collection::Students => student_payload("ADM100", "Adams"),
                Collection::Teachers => CreatePayload::from_json(
                    collection,
                    json!({"teacher_no": "T100", "full_name": "Ana Ruiz", "hire_date": "2023-01-09"}),
                )
                .unwrap(),
                Collection::Classes => CreatePayload::from_json(
                    collection,
                    json!({"grade": "7", "section": "C", "academic_year": "2024"}),
                )
                .unwrap(),
                Collection::Subjects => CreatePayload::from_json(
                    collection,
                    json!({"name": "Science", "code": "SCI"}),
                )
                .unwrap(),
            };
            let created = storage.create_entity(payload).await.unwrap();
            assert!(!created.id().is_empty());
            assert_eq!(created.collection(), collection);

            let list = storage.list_entities(collection).await.unwrap();
            let hits = list.ids().into_iter().filter(|id| *id == created.id()).count();
            assert_eq!(hits, 1, "{collection}");
        }
    }

    #[tokio::test]
    async fn test_delete_then_fetch_excludes_id() {
        let storage = storage();
        assert!(storage.delete_entity(Collection::Students, "1").await.unwrap());
        let list = storage.list_entities(Collection::Students).await.unwrap();
        assert!(!list.ids().contains(&"1"));

        // 再次删除不报错
        assert!(!storage.delete_entity(Collection::Students, "1").await.unwrap());
        assert!(!storage.delete_entity(Collection::Subjects, "missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_mutates_and_unknown_id_changes_nothing() {
        let storage = storage();
        let update =
            UpdatePayload::from_json(Collection::Students, json!({"roll_no": "201", "class_id": ""}))
                .unwrap();
        let updated = storage.update_entity("1", update).await.unwrap();
        assert!(updated.is_some());

        let student = storage.get_student_by_id("1").await.unwrap().unwrap();
        assert_eq!(student.roll_no, "201");
        assert_eq!(student.class_id, None);

        let before = storage.list_entities(Collection::Students).await.unwrap();
        let update =
            UpdatePayload::from_json(Collection::Students, json!({"roll_no": "999"})).unwrap();
        assert!(storage.update_entity("nope", update).await.unwrap().is_none());
        let after = storage.list_entities(Collection::Students).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_dangling_references_yield_none() {
        let storage = storage();
        assert!(storage.delete_class("1").await.unwrap());
        assert!(storage.delete_teacher("2").await.unwrap());

        let EntityList::Students(students) =
            storage.list_entities(Collection::Students).await.unwrap()
        else {
            panic!("expected students");
        };
        let john = students.iter().find(|s| s.student.id == "1").unwrap();
        assert_eq!(john.student.class_id.as_deref(), Some("1"));
        assert!(john.class_label.is_none());

        let classes = storage.list_classes().await.unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes[0].teacher_name.is_none());
    }

    #[tokio::test]
    async fn test_photo_upload_returns_data_uri() {
        let storage = storage();
        let reference = storage
            .upload_photo("students/1_a.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert!(reference.starts_with("data:image/png;base64,"));
        assert_eq!(storage.public_url(&reference), reference);
        assert!(storage.read_photo("students/1_a.png").await.unwrap().is_none());
        assert!(!storage.delete_photo(&reference).await.unwrap());
    }

    #[tokio::test]
    async fn test_student_photo_url_is_resolved() {
        let storage = storage();
        let mut payload = student_payload("ADM101", "Baker");
        if let CreatePayload::Student(req) = &mut payload {
            req.photo_path = Some("students/9_b.jpg".to_string());
        }
        let created = storage.create_entity(payload).await.unwrap();
        let students = storage.list_students().await.unwrap();
        let view = students
            .iter()
            .find(|s| s.student.id == created.id())
            .unwrap();
        assert_eq!(
            view.photo_url.as_deref(),
            Some("http://127.0.0.1:8080/api/v1/photos/students/9_b.jpg")
        );
    }

    #[tokio::test]
    async fn test_admin_users() {
        let storage = storage();
        assert_eq!(storage.count_admin_users().await.unwrap(), 0);
        let admin = storage.create_admin_user("admin", "hash").await.unwrap();
        assert_eq!(storage.count_admin_users().await.unwrap(), 1);
        assert_eq!(
            storage.get_admin_user_by_username("admin").await.unwrap(),
            Some(admin.clone())
        );
        assert_eq!(storage.get_admin_user_by_id(&admin.id).await.unwrap(), Some(admin));
        assert!(storage.create_admin_user("admin", "other").await.is_err());
    }
}
