use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::clients as client_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::clients::ClientForm;
use crate::models::views::{FormPage, ListPage};
use crate::validation::field_errors;

const LIST: &str = "/Clients";
const ENTITY: &str = "Client";

/// GET /Clients: search, filter and sort clients.
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = client_db::list_clients(db.get_ref(), &query).await?;
    let counts = client_db::count_clients(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /Clients/Details/{id}
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = client_db::get_client_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(client))
}

/// GET /Clients/Create
pub async fn create_form(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new(ClientForm::blank()))
}

/// POST /Clients/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<ClientForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match client_db::insert_client(db.get_ref(), input).await {
        Ok(client) => {
            tracing::info!(client_id = client.id, "client created");
            Ok(redirect_to(LIST, "Client created successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save client");
            Ok(failed_form(FormPage::new(form)))
        }
    }
}

/// GET /Clients/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = client_db::get_client_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(FormPage::new(ClientForm::from(&client))))
}

/// POST /Clients/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<ClientForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "client id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match client_db::update_client(db.get_ref(), id, input).await {
        Ok(_) => {
            tracing::info!(client_id = id, "client updated");
            Ok(redirect_to(LIST, "Client updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = client_db::client_exists(db.get_ref(), id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Clients/Delete/{id}: confirmation view.
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let client = client_db::get_client_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(client))
}

/// POST /Clients/Delete/{id}: a missing client is not an error.
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = client_db::delete_client(db.get_ref(), id).await?;
    tracing::info!(client_id = id, rows = result.rows_affected, "client deleted");
    Ok(redirect_to(LIST, "Client deleted successfully!"))
}
