// src/main.rs
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;

use crate::auth::JwtService;
use crate::config::{Config, StorageBackend};
use crate::state::AppState;
use crate::storage::{LocalStorage, ObjectStorage, S3Storage};

mod auth;
mod config;
mod controllers;
mod db;
mod error;
mod formatters;
mod models;
mod pagination;
mod policy;
mod repositories;
mod response;
mod services;
mod state;
mod storage;
mod utils;

#[cfg(test)]
mod testing;

const UPLOADS_ROUTE: &str = "/uploads";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting up...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Konfigurasi tidak valid: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::establish_connection(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Gagal inisialisasi pool database: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::migrate(&pool).await {
        log::error!("Gagal menjalankan migrasi: {:?}", e);
        std::process::exit(1);
    }

    let (storage, served_dir): (Arc<dyn ObjectStorage>, Option<_>) = match config.storage_backend {
        StorageBackend::S3 => {
            log::info!("storing banners in s3://{}", config.s3_bucket);
            (Arc::new(S3Storage::from_config(&config).await), None)
        }
        StorageBackend::Local => {
            log::info!("storing banners in {}", config.upload_dir.display());
            std::fs::create_dir_all(&config.upload_dir)?;
            (
                Arc::new(LocalStorage::new(config.upload_dir.clone(), UPLOADS_ROUTE)),
                Some(config.upload_dir.clone()),
            )
        }
    };

    let jwt = JwtService::from_config(&config);
    let state = web::Data::new(AppState::new(pool, storage, jwt));
    let cors_origin = config.cors_allowed_origin.clone();

    log::info!("listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(controllers::configure);

        if let Some(dir) = &served_dir {
            app = app.service(Files::new(UPLOADS_ROUTE, dir));
        }
        app
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
