// src/db.rs
use sqlx::{MySql, Pool};

use crate::config::Config;
use crate::models::role::DEFAULT_ROLES;

pub async fn establish_connection(config: &Config) -> Result<Pool<MySql>, sqlx::Error> {
    let pool = sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("Gagal membuat pool database: {:?}", e);
            e
        })?;

    Ok(pool)
}

const SCHEMA: [&str; 7] = [
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        role_name VARCHAR(50) NOT NULL UNIQUE,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        role_id BIGINT UNSIGNED NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT fk_users_role FOREIGN KEY (role_id) REFERENCES roles (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS announcements (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        images VARCHAR(1024) NOT NULL DEFAULT '',
        user_id BIGINT UNSIGNED NOT NULL,
        slug VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT fk_announcements_user FOREIGN KEY (user_id) REFERENCES users (id),
        INDEX idx_announcements_created (created_at)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        category_name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        images VARCHAR(1024) NOT NULL DEFAULT '',
        slug VARCHAR(255) NOT NULL,
        user_id BIGINT UNSIGNED NOT NULL,
        category_id BIGINT UNSIGNED NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT fk_articles_user FOREIGN KEY (user_id) REFERENCES users (id),
        CONSTRAINT fk_articles_category FOREIGN KEY (category_id) REFERENCES categories (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS study_rundowns (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        on_scheduled BOOLEAN NOT NULL DEFAULT FALSE,
        schedule_date VARCHAR(50) NOT NULL DEFAULT '',
        time VARCHAR(50) NOT NULL,
        user_id BIGINT UNSIGNED NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT fk_study_rundowns_user FOREIGN KEY (user_id) REFERENCES users (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS study_videos (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        video_url VARCHAR(1024) NOT NULL,
        user_id BIGINT UNSIGNED NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT fk_study_videos_user FOREIGN KEY (user_id) REFERENCES users (id)
    )
    "#,
];

/// Creates missing tables and seeds the default roles. Safe to run on every start.
pub async fn migrate(pool: &Pool<MySql>) -> Result<(), sqlx::Error> {
    log::info!("running schema migration...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    for role in DEFAULT_ROLES {
        sqlx::query("INSERT IGNORE INTO roles (role_name) VALUES (?)")
            .bind(role)
            .execute(pool)
            .await?;
    }

    log::info!("database connected");
    Ok(())
}
