//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 照片写入 `{upload.dir}/photos/` 存储桶目录。

mod admin_users;
mod classes;
mod photos;
mod students;
mod subjects;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolAdminError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    upload_dir: PathBuf,
    public_base_url: String,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
            &config.upload.dir,
            &config.upload.public_base_url,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(
        url: &str,
        pool_size: u32,
        timeout: u64,
        upload_dir: &str,
        public_base_url: &str,
    ) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移（仅建表，已存在则跳过）
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", redact_url(&db_url));

        Ok(Self {
            db,
            upload_dir: PathBuf::from(upload_dir),
            public_base_url: public_base_url.to_string(),
        })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                SchoolAdminError::database_connection(format!("SQLite 连接失败: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// 日志中隐藏连接串里的密码
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &url[scheme_end + 3..at];
            match creds.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &creds[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

// Storage trait 实现
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
use crate::storage::{Storage, StorageMode, photos::resolve_public_url};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Live
    }

    // 学生模块
    async fn list_students(&self) -> Result<Vec<StudentWithClass>> {
        self.list_students_impl().await
    }

    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn update_student(
        &self,
        id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn list_teachers(&self) -> Result<Vec<TeacherView>> {
        self.list_teachers_impl().await
    }

    async fn get_teacher_by_id(&self, id: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn update_teacher(
        &self,
        id: &str,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: &str) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 班级模块
    async fn list_classes(&self) -> Result<Vec<ClassWithTeacher>> {
        self.list_classes_impl().await
    }

    async fn get_class_by_id(&self, id: &str) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn update_class(&self, id: &str, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: &str) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 科目模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn update_subject(
        &self,
        id: &str,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: &str) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 管理员模块
    async fn get_admin_user_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        self.get_admin_user_by_username_impl(username).await
    }

    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>> {
        self.get_admin_user_by_id_impl(id).await
    }

    async fn count_admin_users(&self) -> Result<u64> {
        self.count_admin_users_impl().await
    }

    async fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<AdminUser> {
        self.create_admin_user_impl(username, password_hash).await
    }

    // 照片模块
    async fn upload_photo(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        self.upload_photo_impl(path, content_type, bytes)
    }

    async fn read_photo(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.read_photo_impl(path)
    }

    async fn delete_photo(&self, path: &str) -> Result<bool> {
        self.delete_photo_impl(path)
    }

    fn public_url(&self, path: &str) -> String {
        resolve_public_url(&self.public_base_url, path)
    }
}
