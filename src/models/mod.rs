pub mod announcement;
pub mod role;
pub mod study_rundown;
pub mod user;
