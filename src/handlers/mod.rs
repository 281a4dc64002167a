pub mod client_services;
pub mod clients;
pub mod departments;
pub mod employees;
pub mod home;
pub mod payments;
pub mod reports;
pub mod services;

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::errors::{AppError, GENERIC_ERROR};
use crate::models::views::{FormPage, Redirect};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Public ──
    cfg.route("/", web::get().to(home::landing));
    cfg.route("/Home/Error", web::get().to(home::error));

    // ── Everything below requires a valid token (AuthenticatedUser extractor) ──
    cfg.route("/dashboard", web::get().to(home::index));

    cfg.service(
        web::scope("/Clients")
            .route("", web::get().to(clients::index))
            .route("/Details/{id}", web::get().to(clients::details))
            .route("/Create", web::get().to(clients::create_form))
            .route("/Create", web::post().to(clients::create))
            .route("/Edit/{id}", web::get().to(clients::edit_form))
            .route("/Edit/{id}", web::post().to(clients::edit))
            .route("/Delete/{id}", web::get().to(clients::delete_confirm))
            .route("/Delete/{id}", web::post().to(clients::delete)),
    );

    cfg.service(
        web::scope("/Services")
            .route("", web::get().to(services::index))
            .route("/Details/{id}", web::get().to(services::details))
            .route("/Create", web::get().to(services::create_form))
            .route("/Create", web::post().to(services::create))
            .route("/Edit/{id}", web::get().to(services::edit_form))
            .route("/Edit/{id}", web::post().to(services::edit))
            .route("/Delete/{id}", web::get().to(services::delete_confirm))
            .route("/Delete/{id}", web::post().to(services::delete)),
    );

    cfg.service(
        web::scope("/Departments")
            .route("", web::get().to(departments::index))
            .route("/Details/{id}", web::get().to(departments::details))
            .route("/Create", web::get().to(departments::create_form))
            .route("/Create", web::post().to(departments::create))
            .route("/Edit/{id}", web::get().to(departments::edit_form))
            .route("/Edit/{id}", web::post().to(departments::edit))
            .route("/Delete/{id}", web::get().to(departments::delete_confirm))
            .route("/Delete/{id}", web::post().to(departments::delete)),
    );

    cfg.service(
        web::scope("/Employees")
            .route("", web::get().to(employees::index))
            .route("/Details/{id}", web::get().to(employees::details))
            .route("/Create", web::get().to(employees::create_form))
            .route("/Create", web::post().to(employees::create))
            .route("/Edit/{id}", web::get().to(employees::edit_form))
            .route("/Edit/{id}", web::post().to(employees::edit))
            .route("/Delete/{id}", web::get().to(employees::delete_confirm))
            .route("/Delete/{id}", web::post().to(employees::delete)),
    );

    cfg.service(
        web::scope("/ClientServices")
            .route("", web::get().to(client_services::index))
            .route("/Details/{id}", web::get().to(client_services::details))
            .route("/Create", web::get().to(client_services::create_form))
            .route("/Create", web::post().to(client_services::create))
            .route("/Edit/{id}", web::get().to(client_services::edit_form))
            .route("/Edit/{id}", web::post().to(client_services::edit))
            .route("/Delete/{id}", web::get().to(client_services::delete_confirm))
            .route("/Delete/{id}", web::post().to(client_services::delete)),
    );

    cfg.service(
        web::scope("/Payments")
            .route("", web::get().to(payments::index))
            .route("/Details/{id}", web::get().to(payments::details))
            .route("/Create", web::get().to(payments::create_form))
            .route("/Create", web::post().to(payments::create))
            .route("/Edit/{id}", web::get().to(payments::edit_form))
            .route("/Edit/{id}", web::post().to(payments::edit))
            .route("/Delete/{id}", web::get().to(payments::delete_confirm))
            .route("/Delete/{id}", web::post().to(payments::delete)),
    );

    cfg.service(
        web::scope("/Reports")
            .route("/Dashboard", web::get().to(reports::dashboard))
            .route("/LatePayments", web::get().to(reports::late_payments))
            .route("/ServiceUsage", web::get().to(reports::service_usage))
            .route("/ClientSummary", web::get().to(reports::client_summary)),
    );
}

/// `303 See Other` back to a list, carrying the one-shot notice in the body.
pub(crate) fn redirect_to(location: &str, notice: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(Redirect {
            redirect: location.to_string(),
            notice: Some(notice.to_string()),
        })
}

/// Re-render a form the user has to correct.
pub(crate) fn invalid_form<F: Serialize>(page: FormPage<F>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(page)
}

/// Re-render a form after a write failed in storage; the cause is only logged.
pub(crate) fn failed_form<F: Serialize>(page: FormPage<F>) -> HttpResponse {
    HttpResponse::InternalServerError().json(page.with_error(Some(GENERIC_ERROR.to_string())))
}

/// An update touched no row: missing rows are 404, anything else is a conflict.
pub(crate) fn update_rejected(still_exists: bool, entity: &'static str, id: i32) -> AppError {
    if still_exists {
        AppError::Conflict { entity, id }
    } else {
        AppError::NotFound { entity, id }
    }
}
