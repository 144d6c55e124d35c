// src/controllers/mod.rs
use actix_web::web::{self, FormConfig, JsonConfig, PathConfig};

use crate::error::AppError;

pub mod announcement_controller;
pub mod auth_controller;
pub mod role_controller;
pub mod study_rundown_controller;
pub mod user_controller;

const BODY_LIMIT: usize = 256 * 1024;

/// Mounts every route under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err, _req| {
            log::warn!("JSON payload error: {}", err);
            AppError::Validation(vec![err.to_string()]).into()
        });

    let form_config = FormConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err, _req| {
            log::warn!("Form payload error: {}", err);
            AppError::Validation(vec![err.to_string()]).into()
        });

    // ids that are not unsigned integers
    let path_config = PathConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid path: {}", err)).into()
    });

    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config)
            .app_data(form_config)
            .app_data(path_config)
            //auth_controller
            .service(auth_controller::register_user)
            .service(auth_controller::login_user)
            //user_controller
            .service(user_controller::get_list_ustadz_name)
            //role_controller
            .service(role_controller::save_role)
            .service(role_controller::get_roles)
            //announcement_controller
            .service(announcement_controller::add_announcement)
            .service(announcement_controller::get_all_announcement)
            .service(announcement_controller::get_detail_announcement)
            .service(announcement_controller::update_announcement)
            .service(announcement_controller::delete_announcement)
            //study_rundown_controller
            .service(study_rundown_controller::add_study)
            .service(study_rundown_controller::get_all_rundown)
            .service(study_rundown_controller::get_detail_study_rundown)
            .service(study_rundown_controller::update_study_rundown)
            .service(study_rundown_controller::delete_study_rundown),
    );
}
