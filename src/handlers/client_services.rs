use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::client_services as assignment_db;
use crate::db::clients as client_db;
use crate::db::services as service_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::client_services::ClientServiceForm;
use crate::models::views::{FormPage, ListPage, select_list};
use crate::validation::field_errors;

const LIST: &str = "/ClientServices";
const ENTITY: &str = "ClientService";

/// Assignment form with the active client and service dropdowns.
async fn assignment_page(
    db: &DatabaseConnection,
    form: ClientServiceForm,
) -> Result<FormPage<ClientServiceForm>, DbErr> {
    let clients = client_db::active_client_options(db).await?;
    let services = service_db::active_service_options(db).await?;

    let advisory = if services.is_empty() {
        tracing::warn!("no active services to assign");
        Some("No active services found. Please create a service first.".to_string())
    } else if clients.is_empty() {
        tracing::warn!("no active clients to assign to");
        Some("No active clients found. Please create a client first.".to_string())
    } else {
        None
    };

    let chosen = form.parse();
    Ok(FormPage::new(form)
        .with_selection("client_id", select_list(clients, Some(chosen.client_id)))
        .with_selection("service_id", select_list(services, Some(chosen.service_id)))
        .with_notice(advisory))
}

/// General error for a client/service pair that cannot be used.
///
/// New assignments need active rows; edits only need the rows to exist.
async fn selection_error(
    db: &DatabaseConnection,
    client_id: i32,
    service_id: i32,
    require_active: bool,
) -> Result<Option<&'static str>, DbErr> {
    if client_id <= 0 {
        return Ok(Some("Please select a client"));
    }
    if service_id <= 0 {
        return Ok(Some("Please select a service"));
    }
    let client_ok = client_db::get_client_by_id(db, client_id)
        .await?
        .is_some_and(|c| c.is_active || !require_active);
    if !client_ok {
        return Ok(Some("The selected client is not available"));
    }
    let service_ok = service_db::get_service_by_id(db, service_id)
        .await?
        .is_some_and(|s| s.is_active || !require_active);
    if !service_ok {
        return Ok(Some("The selected service is not available"));
    }
    Ok(None)
}

/// GET /ClientServices
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = assignment_db::list_client_services(db.get_ref(), &query).await?;
    let counts = assignment_db::count_client_services(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /ClientServices/Details/{id}: includes client and service names.
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = assignment_db::get_client_service_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// GET /ClientServices/Create
pub async fn create_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let page = assignment_page(db.get_ref(), ClientServiceForm::blank()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /ClientServices/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<ClientServiceForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let form = form.into_inner();
    let input = form.parse();

    let error = selection_error(db, input.client_id, input.service_id, true).await?;
    let errors = input.validate().err().map(|e| field_errors(&e));
    if error.is_some() || errors.is_some() {
        let page = assignment_page(db, form)
            .await?
            .with_error(error.map(str::to_string))
            .with_field_errors(errors.unwrap_or_default());
        return Ok(invalid_form(page));
    }

    match assignment_db::insert_client_service(db, input).await {
        Ok(assignment) => {
            tracing::info!(
                client_service_id = assignment.id,
                client_id = assignment.client_id,
                service_id = assignment.service_id,
                "service assigned"
            );
            Ok(redirect_to(LIST, "Service assigned successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save service assignment");
            Ok(failed_form(assignment_page(db, form).await?))
        }
    }
}

/// GET /ClientServices/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let assignment = assignment_db::get_client_service_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    let page = assignment_page(db.get_ref(), ClientServiceForm::from(&assignment)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /ClientServices/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<ClientServiceForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "client service id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    let error = selection_error(db, input.client_id, input.service_id, false).await?;
    let errors = input.validate().err().map(|e| field_errors(&e));
    if error.is_some() || errors.is_some() {
        let page = assignment_page(db, form)
            .await?
            .with_error(error.map(str::to_string))
            .with_field_errors(errors.unwrap_or_default());
        return Ok(invalid_form(page));
    }

    match assignment_db::update_client_service(db, id, input).await {
        Ok(_) => {
            tracing::info!(client_service_id = id, "service assignment updated");
            Ok(redirect_to(LIST, "Service assignment updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = assignment_db::client_service_exists(db, id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /ClientServices/Delete/{id}
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = assignment_db::get_client_service_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// POST /ClientServices/Delete/{id}
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = assignment_db::delete_client_service(db.get_ref(), id).await?;
    tracing::info!(client_service_id = id, rows = result.rows_affected, "service assignment deleted");
    Ok(redirect_to(LIST, "Service assignment deleted successfully!"))
}
