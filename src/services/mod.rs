pub mod announcement_service;
pub mod role_service;
pub mod study_rundown_service;
pub mod user_service;

pub use announcement_service::AnnouncementService;
pub use role_service::RoleService;
pub use study_rundown_service::StudyRundownService;
pub use user_service::UserService;
