use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::departments as department_db;
use crate::errors::AppError;
use crate::handlers::{failed_form, invalid_form, redirect_to, update_rejected};
use crate::models::ListQuery;
use crate::models::departments::DepartmentForm;
use crate::models::views::{FormPage, ListPage};
use crate::validation::field_errors;

const LIST: &str = "/Departments";
const ENTITY: &str = "Department";

/// GET /Departments: search and sort departments.
pub async fn index(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let items = department_db::list_departments(db.get_ref(), &query).await?;
    let counts = department_db::count_departments(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListPage::new(items, counts, query)))
}

/// GET /Departments/Details/{id}
pub async fn details(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let department = department_db::get_department_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(department))
}

/// GET /Departments/Create
pub async fn create_form(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new(DepartmentForm::default()))
}

/// POST /Departments/Create
pub async fn create(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    form: web::Form<DepartmentForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match department_db::insert_department(db.get_ref(), input).await {
        Ok(department) => {
            tracing::info!(department_id = department.id, "department created");
            Ok(redirect_to(LIST, "Department created successfully!"))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save department");
            Ok(failed_form(FormPage::new(form)))
        }
    }
}

/// GET /Departments/Edit/{id}
pub async fn edit_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let department = department_db::get_department_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(FormPage::new(DepartmentForm::from(&department))))
}

/// POST /Departments/Edit/{id}
pub async fn edit(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<DepartmentForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = form.into_inner();
    if form.id() != id {
        tracing::warn!(path_id = id, form_id = form.id(), "department id mismatch");
        return Err(AppError::NotFound { entity: ENTITY, id });
    }

    let input = form.parse();
    if let Err(errors) = input.validate() {
        return Ok(invalid_form(
            FormPage::new(form).with_field_errors(field_errors(&errors)),
        ));
    }

    match department_db::update_department(db.get_ref(), id, input).await {
        Ok(_) => {
            tracing::info!(department_id = id, "department updated");
            Ok(redirect_to(LIST, "Department updated successfully!"))
        }
        Err(DbErr::RecordNotUpdated) => {
            let exists = department_db::department_exists(db.get_ref(), id).await?;
            Err(update_rejected(exists, ENTITY, id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /Departments/Delete/{id}: confirmation view.
pub async fn delete_confirm(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let department = department_db::get_department_by_id(db.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: ENTITY, id })?;
    Ok(HttpResponse::Ok().json(department))
}

/// POST /Departments/Delete/{id}: a missing department is not an error.
pub async fn delete(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = department_db::delete_department(db.get_ref(), id).await?;
    tracing::info!(department_id = id, rows = result.rows_affected, "department deleted");
    Ok(redirect_to(LIST, "Department deleted successfully!"))
}
