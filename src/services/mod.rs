pub mod auth;
pub mod collections;
pub mod dashboard;
pub mod photos;
pub mod reports;
pub mod students;

pub use auth::AuthService;
pub use collections::CollectionService;
pub use dashboard::DashboardService;
pub use photos::PhotoService;
pub use reports::ReportService;
pub use students::StudentService;
