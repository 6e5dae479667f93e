//! Bearer-credential handling for the `/stores/{store_id}` API.
//!
//! The console stores the token issued at login and sends it back verbatim in
//! the `Authorization` header (with or without a `Bearer ` prefix). Only the
//! store id carried in the claims is used here.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreClaimData {
    pub store_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub data: StoreClaimData,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

/// Secret shared with the identity service that signs operator tokens.
#[derive(Clone)]
pub struct AuthConfig {
    decoding_key: DecodingKey,
}

impl AuthConfig {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized
            })
    }
}

/// The authenticated operator's store, taken from a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSession {
    pub store_id: Uuid,
}

impl StoreSession {
    /// Reject requests addressed to a store other than the caller's own.
    pub fn authorize(&self, store_id: Uuid) -> Result<Uuid, AppError> {
        if self.store_id == store_id {
            Ok(store_id)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let raw = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<StoreSession, AppError> {
    let config = req.app_data::<web::Data<AuthConfig>>().ok_or_else(|| {
        AppError::Internal("authentication is not configured".to_string())
    })?;
    let token = bearer_token(req).ok_or(AppError::Unauthorized)?;
    let claims = config.decode(token)?;
    Ok(StoreSession {
        store_id: claims.data.store_id,
    })
}

impl FromRequest for StoreSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
