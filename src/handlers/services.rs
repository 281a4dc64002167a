use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::services as service_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::services::ServiceForm;
use crate::models::views::{FormPage, ListPage};
use crate::validation::field_errors;

const LIST: &str = "/Services";
const ENTITY: &str = "Service";

/// GET /Services: search, filter and sort services.
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = service_db::list_services(db.get_ref(), &query).await?;
    let counts = service_db::count_services(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /Services/Details/{id}
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(service))
}

/// GET /Services/Create
pub async fn create_form(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new(ServiceForm::blank()))
}

/// POST /Services/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match service_db::insert_service(db.get_ref(), input).await {
        Ok(service) => {
            tracing::info!(service_id = service.id, "service created");
            Ok(redirect_to(LIST, "Service created successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save service");
            Ok(failed_form(FormPage::new(form)))
        }
    }
}

/// GET /Services/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(FormPage::new(ServiceForm::from(&service))))
}

/// POST /Services/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "service id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match service_db::update_service(db.get_ref(), id, input).await {
        Ok(_) => {
            tracing::info!(service_id = id, "service updated");
            Ok(redirect_to(LIST, "Service updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = service_db::service_exists(db.get_ref(), id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Services/Delete/{id}: confirmation view.
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(service))
}

/// POST /Services/Delete/{id}: a missing service is not an error.
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = service_db::delete_service(db.get_ref(), id).await?;
    tracing::info!(service_id = id, rows = result.rows_affected, "service deleted");
    Ok(redirect_to(LIST, "Service deleted successfully!"))
}
