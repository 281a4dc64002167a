use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use crate::auth::jwt::{self, Principal};

/// Cookie carrying the token for browser sessions.
pub const SESSION_COOKIE: &str = "session";

/// Extractor that rejects the request with `401` unless it carries a valid
/// token, either as `Authorization: Bearer <token>` or in the session cookie.
pub struct AuthenticatedUser(pub Principal);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let token = bearer_token(req)
        .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing credentials"))?;

    let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
        actix_web::error::ErrorInternalServerError("JWT secret not configured")
    })?;

    let principal = jwt::validate_token(&token, &secret.0)
        .and_then(jwt::Claims::into_principal)
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected token");
            actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}"))
        })?;

    Ok(AuthenticatedUser(principal))
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
