use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::client_services as assignment_db;
use crate::db::reports as report_db;
use crate::errors::AppError;
use crate::models::reports::{ClientSummaryReport, LATE_PAYMENT_WINDOW_DAYS, LatePaymentsReport};
use crate::validation::format_date;

/// GET /Reports/Dashboard
pub async fn dashboard(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let report = report_db::dashboard(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /Reports/LatePayments: active clients with no payment in 30 days.
pub async fn late_payments(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let clients = report_db::late_payment_clients(db.get_ref(), now).await?;
    Ok(HttpResponse::Ok().json(LatePaymentsReport {
        report_date: format_date(&now),
        window_days: LATE_PAYMENT_WINDOW_DAYS,
        clients,
    }))
}

/// GET /Reports/ServiceUsage
pub async fn service_usage(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let rows = report_db::service_usage(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /Reports/ClientSummary
pub async fn client_summary(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let clients = report_db::clients_by_name(db.get_ref()).await?;
    let client_services = assignment_db::all_client_service_rows(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ClientSummaryReport {
        clients,
        client_services,
    }))
}
