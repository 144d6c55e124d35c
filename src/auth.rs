// src/auth.rs
use std::ops::Deref;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, http::header, web};
use chrono::{Duration, Utc};
use futures_util::future::{LocalBoxFuture, ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: u64,
    pub exp: usize,
}

/// HS256 token issue/verify with a secret taken from [`Config`].
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_ttl_hours)
    }

    pub fn generate_token(&self, user_id: u64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_id,
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty() && !token.contains(' ')).then(|| token.to_string())
}

/// The authenticated caller. Resolving it validates the bearer token, loads
/// the user with its role and caches it in the request extensions; any
/// failure is a 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<CurrentUser>() {
            return Box::pin(ready(Ok(user.clone())));
        }

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            log::error!("AppState missing while authenticating {}", req.path());
            return Box::pin(ready(Err(AppError::Unauthorized)));
        };

        let Some(token) = bearer_token(req) else {
            log::warn!("missing bearer token on {}", req.path());
            return Box::pin(ready(Err(AppError::Unauthorized)));
        };

        let req = req.clone();
        Box::pin(async move {
            let claims = state.jwt.validate_token(&token).map_err(|e| {
                log::warn!("JWT verification failed on {}: {}", req.path(), e);
                AppError::Unauthorized
            })?;

            let user = state
                .users
                .get_user_by_id(claims.user_id)
                .await
                .map_err(|e| {
                    log::warn!("token user {} not resolved: {}", claims.user_id, e);
                    AppError::Unauthorized
                })?;

            let current = CurrentUser(user);
            req.extensions_mut().insert(current.clone());
            Ok(current)
        })
    }
}
