// src/utils.rs
use actix_multipart::{Field, Multipart};
use chrono::NaiveDate;
use deunicode::deunicode_with_tofu;
use futures_util::TryStreamExt as _;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::announcement::{AnnouncementInput, UploadedFile};

/// Banner upload limit (1 MiB).
pub const MAX_BANNER_BYTES: usize = 1_048_576;

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

pub fn generate_slug(text: &str) -> String {
    let slug = deunicode_with_tofu(text, "-")
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>();

    slug.trim_matches('-')
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

/// Extension after the last dot, lowercased. Names without a usable
/// extension (no dot, trailing dot, odd characters) yield `None`.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    let ok = !stem.is_empty()
        && !ext.is_empty()
        && ext.len() <= 10
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    ok.then(|| ext.to_ascii_lowercase())
}

/// `announcement-{slug}-{YYYY-MM-DD}-{suffix}[.ext]`
pub fn banner_key(slug: &str, date: NaiveDate, file_name: &str, suffix: &str) -> String {
    let base = format!("announcement-{}-{}-{}", slug, date.format("%Y-%m-%d"), suffix);
    match file_extension(file_name) {
        Some(ext) => format!("{}.{}", base, ext),
        None => base,
    }
}

pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub fn content_type_for(file: &UploadedFile) -> String {
    if let Some(ct) = &file.content_type {
        return ct.clone();
    }

    let guessed = match file_extension(&file.file_name).as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        _ => mime::APPLICATION_OCTET_STREAM,
    };
    guessed.essence_str().to_string()
}

/// Parsed announcement multipart form.
#[derive(Debug, Default)]
pub struct AnnouncementForm {
    pub input: AnnouncementInput,
    pub banner: Option<UploadedFile>,
    /// The `banner` part exceeded [`MAX_BANNER_BYTES`]; its bytes were discarded.
    pub banner_too_large: bool,
}

pub async fn read_announcement_form(mut payload: Multipart) -> Result<AnnouncementForm, AppError> {
    let mut form = AnnouncementForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or("").to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => continue,
        };

        match name.as_str() {
            "banner" => {
                let content_type = field.content_type().map(|m| m.essence_str().to_string());
                let mut bytes = Vec::new();
                let mut too_large = false;

                while let Some(chunk) = field.try_next().await.map_err(|e| {
                    AppError::BadRequest(format!("File read error: {}", e))
                })? {
                    if too_large {
                        continue;
                    }
                    if bytes.len() + chunk.len() > MAX_BANNER_BYTES {
                        too_large = true;
                        bytes.clear();
                        continue;
                    }
                    bytes.extend_from_slice(&chunk);
                }

                if too_large {
                    form.banner_too_large = true;
                } else if !bytes.is_empty() {
                    form.banner = Some(UploadedFile {
                        file_name: file_name.unwrap_or_default(),
                        content_type,
                        bytes,
                    });
                }
            }
            "title" => form.input.title = read_text(&mut field, &name).await?,
            "description" => form.input.description = read_text(&mut field, &name).await?,
            "slug" => form.input.slug = read_text(&mut field, &name).await?,
            other => log::debug!("ignoring multipart field '{}'", other),
        }
    }

    Ok(form)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?
    {
        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::BadRequest(format!("{} is too long", name)));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes)
        .map(|s| s.trim().to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} encoding", name)))
}
