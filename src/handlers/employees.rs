use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::departments as department_db;
use crate::db::employees as employee_db;
use crate::db::services as service_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::employees::{EmployeeForm, EmployeeInput};
use crate::models::views::{FormPage, ListPage, select_list};
use crate::validation::{FieldErrors, field_errors, push_error};

const LIST: &str = "/Employees";
const ENTITY: &str = "Employee";

/// Employee form with every department and the active services.
async fn employee_page(
    db: &DatabaseConnection,
    form: EmployeeForm,
) -> Result<FormPage<EmployeeForm>, DbErr> {
    let departments = department_db::department_options(db).await?;
    let services = service_db::active_service_options(db).await?;
    let chosen = form.parse();
    Ok(FormPage::new(form)
        .with_selection("department_id", select_list(departments, chosen.department_id))
        .with_selection("service_id", select_list(services, chosen.service_id)))
}

/// Field rules plus the optional references. A department must exist; a
/// service must exist and, for new employees, be active.
async fn check_employee(
    db: &DatabaseConnection,
    input: &EmployeeInput,
    require_active_service: bool,
) -> Result<FieldErrors, DbErr> {
    let mut errors = input
        .validate()
        .err()
        .map(|e| field_errors(&e))
        .unwrap_or_default();

    if let Some(department_id) = input.department_id {
        if !department_db::department_exists(db, department_id).await? {
            push_error(&mut errors, "department_id", "The selected department is not available");
        }
    }
    if let Some(service_id) = input.service_id {
        let usable = service_db::get_service_by_id(db, service_id)
            .await?
            .is_some_and(|s| s.is_active || !require_active_service);
        if !usable {
            push_error(&mut errors, "service_id", "The selected service is not available");
        }
    }
    Ok(errors)
}

/// GET /Employees
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = employee_db::list_employees(db.get_ref(), &query).await?;
    let counts = employee_db::count_employees(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /Employees/Details/{id}: includes department and service names.
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = employee_db::get_employee_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// GET /Employees/Create
pub async fn create_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let page = employee_page(db.get_ref(), EmployeeForm::blank()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /Employees/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let form = form.into_inner();
    let input = form.parse();

    let errors = check_employee(db, &input, true).await?;
    if !errors.is_empty() {
        let page = employee_page(db, form).await?.with_field_errors(errors);
        return Ok(invalid_form(page));
    }

    match employee_db::insert_employee(db, input).await {
        Ok(employee) => {
            tracing::info!(employee_id = employee.id, "employee created");
            Ok(redirect_to(LIST, "Employee created successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save employee");
            Ok(failed_form(employee_page(db, form).await?))
        }
    }
}

/// GET /Employees/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let employee = employee_db::get_employee_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    let page = employee_page(db.get_ref(), EmployeeForm::from(&employee)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /Employees/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "employee id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    let errors = check_employee(db, &input, false).await?;
    if !errors.is_empty() {
        let page = employee_page(db, form).await?.with_field_errors(errors);
        return Ok(invalid_form(page));
    }

    match employee_db::update_employee(db, id, input).await {
        Ok(_) => {
            tracing::info!(employee_id = id, "employee updated");
            Ok(redirect_to(LIST, "Employee updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = employee_db::employee_exists(db, id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Employees/Delete/{id}
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = employee_db::get_employee_row(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(row))
}

/// POST /Employees/Delete/{id}
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = employee_db::delete_employee(db.get_ref(), id).await?;
    tracing::info!(employee_id = id, rows = result.rows_affected, "employee deleted");
    Ok(redirect_to(LIST, "Employee deleted successfully!"))
}
