use chrono::Utc;
use sea_orm::*;

use crate::models::employees::{self, EmployeeInput, EmployeeRow};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder, departments, services};

/// Employees with department and service names (left joins: both are optional).
fn employee_rows() -> Select<employees::Entity> {
    employees::Entity::find()
        .select_only()
        .columns([
            employees::Column::Id,
            employees::Column::FirstName,
            employees::Column::LastName,
            employees::Column::Email,
            employees::Column::Phone,
            employees::Column::Designation,
            employees::Column::HireDate,
            employees::Column::IsActive,
            employees::Column::DepartmentId,
            employees::Column::ServiceId,
        ])
        .column_as(departments::Column::Name, "department_name")
        .column_as(services::Column::Name, "service_name")
        .join(JoinType::LeftJoin, employees::Relation::Department.def())
        .join(JoinType::LeftJoin, employees::Relation::Service.def())
}

/// Default order: last name, then first name, ascending.
pub async fn list_employees(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<EmployeeRow>, DbErr> {
    let mut select = employee_rows();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(employees::Column::FirstName.contains(term))
                .add(employees::Column::LastName.contains(term))
                .add(employees::Column::Email.contains(term))
                .add(employees::Column::Phone.contains(term))
                .add(employees::Column::Designation.contains(term)),
        );
    }
    if let Some(active) = query.active_filter() {
        select = select.filter(employees::Column::IsActive.eq(active));
    }

    let sort = query.sort_order().unwrap_or(SortOrder::asc(SortKey::Name));
    select = match sort.key {
        SortKey::Date => select.order_by(employees::Column::HireDate, sort.order()),
        SortKey::Status => select.order_by(employees::Column::IsActive, sort.order()),
        SortKey::Name | SortKey::Amount => select
            .order_by(employees::Column::LastName, sort.order())
            .order_by(employees::Column::FirstName, sort.order()),
    };

    select
        .order_by_asc(employees::Column::Id)
        .into_model::<EmployeeRow>()
        .all(db)
        .await
}

pub async fn count_employees(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    let total = employees::Entity::find().count(db).await?;
    let active = employees::Entity::find()
        .filter(employees::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(ListCounts {
        total,
        active: Some(active),
        inactive: Some(total.saturating_sub(active)),
    })
}

pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<employees::Model>, DbErr> {
    employees::Entity::find_by_id(id).one(db).await
}

/// Single employee with department and service names.
pub async fn get_employee_row(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<EmployeeRow>, DbErr> {
    employee_rows()
        .filter(employees::Column::Id.eq(id))
        .into_model::<EmployeeRow>()
        .one(db)
        .await
}

pub async fn employee_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(employees::Entity::find_by_id(id).count(db).await? > 0)
}

/// Insert a new employee; a missing hire date becomes "now".
pub async fn insert_employee(
    db: &DatabaseConnection,
    input: EmployeeInput,
) -> Result<employees::Model, DbErr> {
    let new_employee = employees::ActiveModel {
        first_name: Set(input.first_name.unwrap_or_default()),
        last_name: Set(input.last_name.unwrap_or_default()),
        email: Set(input.email),
        phone: Set(input.phone),
        designation: Set(input.designation),
        hire_date: Set(Some(input.hire_date.unwrap_or_else(Utc::now))),
        is_active: Set(input.is_active),
        department_id: Set(input.department_id),
        service_id: Set(input.service_id),
        ..Default::default()
    };

    new_employee.insert(db).await
}

pub async fn update_employee(
    db: &DatabaseConnection,
    id: i32,
    input: EmployeeInput,
) -> Result<employees::Model, DbErr> {
    let employee = employees::ActiveModel {
        id: Unchanged(id),
        first_name: Set(input.first_name.unwrap_or_default()),
        last_name: Set(input.last_name.unwrap_or_default()),
        email: Set(input.email),
        phone: Set(input.phone),
        designation: Set(input.designation),
        hire_date: Set(input.hire_date),
        is_active: Set(input.is_active),
        department_id: Set(input.department_id),
        service_id: Set(input.service_id),
    };

    employee.update(db).await
}

pub async fn delete_employee(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    employees::Entity::delete_by_id(id).exec(db).await
}
