use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    admin_users::entities::AdminUser,
    classes::{
        entities::{Class, ClassWithTeacher},
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    collections::{Collection, CreatePayload, EntityList, EntityRecord, UpdatePayload},
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

pub mod memory_storage;
pub mod mode;
pub mod photos;
pub mod sea_orm_storage;

pub use mode::StorageMode;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 当前存储模式
    fn mode(&self) -> StorageMode;

    /// 学生管理方法
    // 列出学生（按姓氏排序，附带班级标签）
    async fn list_students(&self) -> Result<Vec<StudentWithClass>>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>>;
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 更新学生信息
    async fn update_student(
        &self,
        id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, id: &str) -> Result<bool>;

    /// 教师管理方法
    // 列出教师（按姓名排序）
    async fn list_teachers(&self) -> Result<Vec<TeacherView>>;
    async fn get_teacher_by_id(&self, id: &str) -> Result<Option<Teacher>>;
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn update_teacher(
        &self,
        id: &str,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: &str) -> Result<bool>;

    /// 班级管理方法
    // 列出班级（按年级排序，附带班主任姓名）
    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>>;
    async fn get_class_by_id(&self, id: &str) -> Result<Option<Class>>;
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn update_class(&self, id: &str, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: &str) -> Result<bool>;

    /// 科目管理方法
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>>;
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn update_subject(
        &self,
        id: &str,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: &str) -> Result<bool>;

    /// 管理员方法
    async fn get_admin_user_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>>;
    async fn count_admin_users(&self) -> Result<u64>;
    async fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<AdminUser>;

    /// 照片存储方法
    // 上传照片，返回存储引用（存储桶路径或 data URI）
    async fn upload_photo(&self, path: &str, content_type: &str, bytes: Vec<u8>)
    -> Result<String>;
    // 读取已存储的照片
    async fn read_photo(&self, path: &str) -> Result<Option<Vec<u8>>>;
    // 删除已存储的照片，不存在时返回 false
    async fn delete_photo(&self, path: &str) -> Result<bool>;
    // 存储引用转为可访问地址
    fn public_url(&self, path: &str) -> String;

    /// 按集合名分派的通用操作
    async fn list_entities(&self, collection: Collection) -> Result<EntityList> {
        Ok(match collection {
            Collection::Students => EntityList::Students(self.list_students().await?),
            Collection::Teachers => EntityList::Teachers(self.list_teachers().await?),
            Collection::Classes => EntityList::Classes(self.list_classes().await?),
            Collection::Subjects => EntityList::Subjects(self.list_subjects().await?),
        })
    }

    async fn get_entity(&self, collection: Collection, id: &str) -> Result<Option<EntityRecord>> {
        Ok(match collection {
            Collection::Students => self.get_student_by_id(id).await?.map(EntityRecord::Student),
            Collection::Teachers => self.get_teacher_by_id(id).await?.map(EntityRecord::Teacher),
            Collection::Classes => self.get_class_by_id(id).await?.map(EntityRecord::Class),
            Collection::Subjects => self.get_subject_by_id(id).await?.map(EntityRecord::Subject),
        })
    }

    async fn create_entity(&self, payload: CreatePayload) -> Result<EntityRecord> {
        Ok(match payload {
            CreatePayload::Student(req) => EntityRecord::Student(self.create_student(req).await?),
            CreatePayload::Teacher(req) => EntityRecord::Teacher(self.create_teacher(req).await?),
            CreatePayload::Class(req) => EntityRecord::Class(self.create_class(req).await?),
            CreatePayload::Subject(req) => EntityRecord::Subject(self.create_subject(req).await?),
        })
    }

    async fn update_entity(&self, id: &str, payload: UpdatePayload) -> Result<Option<EntityRecord>> {
        Ok(match payload {
            UpdatePayload::Student(req) => {
                self.update_student(id, req).await?.map(EntityRecord::Student)
            }
            UpdatePayload::Teacher(req) => {
                self.update_teacher(id, req).await?.map(EntityRecord::Teacher)
            }
            UpdatePayload::Class(req) => self.update_class(id, req).await?.map(EntityRecord::Class),
            UpdatePayload::Subject(req) => {
                self.update_subject(id, req).await?.map(EntityRecord::Subject)
            }
        })
    }

    /// 删除记录，记录不存在时返回 false
    async fn delete_entity(&self, collection: Collection, id: &str) -> Result<bool> {
        match collection {
            Collection::Students => self.delete_student(id).await,
            Collection::Teachers => self.delete_teacher(id).await,
            Collection::Classes => self.delete_class(id).await,
            Collection::Subjects => self.delete_subject(id).await,
        }
    }
}

/// 按配置选择存储实现，进程内只构建一次
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    let requested = config.database.mode.trim().to_lowercase();

    match StorageMode::detect(&config.database) {
        StorageMode::Live => match sea_orm_storage::SeaOrmStorage::new_async().await {
            Ok(storage) => Ok(Arc::new(storage)),
            Err(e) if requested != "live" => {
                tracing::warn!("Database unavailable, falling back to demo mode: {e}");
                Ok(Arc::new(memory_storage::MemoryStorage::seeded(
                    &config.upload.public_base_url,
                )))
            }
            Err(e) => Err(e),
        },
        StorageMode::Demo => {
            tracing::info!("Running in demo mode with in-memory sample data");
            Ok(Arc::new(memory_storage::MemoryStorage::seeded(
                &config.upload.public_base_url,
            )))
        }
    }
}
