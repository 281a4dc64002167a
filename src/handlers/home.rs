use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::reports as report_db;
use crate::errors::GENERIC_ERROR;
use crate::models::reports::HomeCounts;

/// GET /: public landing page.
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "application": "ExcellOn Services",
        "message": "Sign in to manage clients, services, employees and payments.",
        "dashboard": "/dashboard",
    }))
}

/// GET /dashboard: summary counts for the signed-in home page.
///
/// Counts fall back to zero when the database cannot be read.
pub async fn index(user: AuthenticatedUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    let counts = report_db::home_counts(db.get_ref())
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load dashboard counts");
            HomeCounts::default()
        });

    HttpResponse::Ok().json(serde_json::json!({
        "user": user.0,
        "counts": counts,
    }))
}

/// GET /Home/Error: public, never cached.
pub async fn error(req: HttpRequest) -> HttpResponse {
    let request_id = req
        .headers()
        .get("X-Request-Id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store, no-cache"))
        .json(serde_json::json!({
            "error": GENERIC_ERROR,
            "request_id": request_id,
        }))
}
