use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Message shown whenever a storage fault has to reach the client.
pub const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Faults that end a request. Validation problems are not here: handlers
/// answer those by re-rendering the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The row still exists but the write did not apply.
    #[error("{entity} {id} was changed by another request")]
    Conflict { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Storage(#[from] DbErr),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound { .. } => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string(),
            })),
            AppError::Conflict { .. } | AppError::Storage(_) => {
                tracing::error!(error = ?self, "request failed");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": GENERIC_ERROR,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404_with_message() {
        let err = AppError::NotFound { entity: "Client", id: 7 };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Client 7 not found");
    }

    #[test]
    fn storage_faults_are_500() {
        let err = AppError::from(DbErr::Custom("connection reset".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let conflict = AppError::Conflict { entity: "Payment", id: 1 };
        assert_eq!(conflict.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
