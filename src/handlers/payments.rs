use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::clients as client_db;
use crate::db::payments as payment_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::payments::PaymentForm;
use crate::models::views::{FormPage, ListPage, select_list};
use crate::validation::field_errors;

const LIST: &str = "/Payments";
const ENTITY: &str = "Payment";

async fn payment_page(
    db: &DatabaseConnection,
    form: PaymentForm,
) -> Result<FormPage<PaymentForm>, DbErr> {
    let clients = client_db::active_client_options(db).await?;
    let advisory = clients.is_empty().then(|| {
        tracing::warn!("no active clients to take payments from");
        "No active clients found. Please create a client first.".to_string()
    });
    let client_id = form.parse().client_id;
    Ok(FormPage::new(form)
        .with_selection("client_id", select_list(clients, Some(client_id)))
        .with_notice(advisory))
}

/// General error for the paying client. New payments need an active client.
async fn client_error(
    db: &DatabaseConnection,
    client_id: i32,
    require_active: bool,
) -> Result<Option<&'static str>, DbErr> {
    if client_id <= 0 {
        return Ok(Some("Please select a client"));
    }
    let usable = client_db::get_client_by_id(db, client_id)
        .await?
        .is_some_and(|c| c.is_active || !require_active);
    Ok((!usable).then_some("The selected client is not available"))
}

/// GET /Payments: newest first unless another order is asked for.
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = payment_db::list_payments(db.get_ref(), &query).await?;
    let counts = payment_db::count_payments(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /Payments/Details/{id}
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = payment_db::get_payment_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// GET /Payments/Create
pub async fn create_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let page = payment_page(db.get_ref(), PaymentForm::blank()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /Payments/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<PaymentForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let form = form.into_inner();
    let input = form.parse();

    let errors = input.validate().err().map(|e| field_errors(&e));
    let mut error = client_error(db, input.client_id, true).await?;
    if error.is_none() && errors.as_ref().is_some_and(|e| e.contains_key("amount")) {
        error = Some("Please enter a valid amount greater than 0");
    }
    if error.is_some() || errors.is_some() {
        let page = payment_page(db, form)
            .await?
            .with_error(error.map(str::to_string))
            .with_field_errors(errors.unwrap_or_default());
        return Ok(invalid_form(page));
    }

    match payment_db::insert_payment(db, input).await {
        Ok(payment) => {
            tracing::info!(
                payment_id = payment.id,
                client_id = payment.client_id,
                amount = payment.amount,
                "payment recorded"
            );
            Ok(redirect_to(LIST, "Payment recorded successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save payment");
            Ok(failed_form(payment_page(db, form).await?))
        }
    }
}

/// GET /Payments/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payment = payment_db::get_payment_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    let page = payment_page(db.get_ref(), PaymentForm::from(&payment)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /Payments/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<PaymentForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "payment id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    let error = client_error(db, input.client_id, false).await?;
    let errors = input.validate().err().map(|e| field_errors(&e));
    if error.is_some() || errors.is_some() {
        let page = payment_page(db, form)
            .await?
            .with_error(error.map(str::to_string))
            .with_field_errors(errors.unwrap_or_default());
        return Ok(invalid_form(page));
    }

    match payment_db::update_payment(db, id, input).await {
        Ok(_) => {
            tracing::info!(payment_id = id, "payment updated");
            Ok(redirect_to(LIST, "Payment updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = payment_db::payment_exists(db, id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Payments/Delete/{id}
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = payment_db::get_payment_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// POST /Payments/Delete/{id}
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = payment_db::delete_payment(db.get_ref(), id).await?;
    tracing::info!(payment_id = id, rows = result.rows_affected, "payment deleted");
    Ok(redirect_to(LIST, "Payment deleted successfully!"))
}
