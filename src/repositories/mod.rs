pub mod announcement_repository;
pub mod role_repository;
pub mod study_rundown_repository;
pub mod user_repository;

pub use announcement_repository::{AnnouncementRepository, MySqlAnnouncementRepository};
pub use role_repository::{MySqlRoleRepository, RoleRepository};
pub use study_rundown_repository::{MySqlStudyRundownRepository, StudyRundownRepository};
pub use user_repository::{MySqlUserRepository, UserRepository};
