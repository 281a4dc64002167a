use chrono::Utc;
use sea_orm::*;

use crate::models::departments::{self, DepartmentInput};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder};

pub async fn list_departments(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<departments::Model>, DbErr> {
    let mut select = departments::Entity::find();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(departments::Column::Name.contains(term))
                .add(departments::Column::Description.contains(term)),
        );
    }

    let sort = query.sort_order().unwrap_or(SortOrder::asc(SortKey::Name));
    let column = match sort.key {
        SortKey::Date => departments::Column::CreatedDate,
        _ => departments::Column::Name,
    };

    select
        .order_by(column, sort.order())
        .order_by_asc(departments::Column::Id)
        .all(db)
        .await
}

/// Departments carry no active flag, so only the total is reported.
pub async fn count_departments(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    Ok(ListCounts {
        total: departments::Entity::find().count(db).await?,
        active: None,
        inactive: None,
    })
}

pub async fn get_department_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<departments::Model>, DbErr> {
    departments::Entity::find_by_id(id).one(db).await
}

pub async fn department_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(departments::Entity::find_by_id(id).count(db).await? > 0)
}

/// `(id, name)` pairs of every department.
pub async fn department_options(db: &DatabaseConnection) -> Result<Vec<(i32, String)>, DbErr> {
    departments::Entity::find()
        .select_only()
        .column(departments::Column::Id)
        .column(departments::Column::Name)
        .order_by_asc(departments::Column::Name)
        .into_tuple()
        .all(db)
        .await
}

pub async fn insert_department(
    db: &DatabaseConnection,
    input: DepartmentInput,
) -> Result<departments::Model, DbErr> {
    let new_department = departments::ActiveModel {
        name: Set(input.name.unwrap_or_default()),
        description: Set(input.description),
        created_date: Set(Utc::now()),
        ..Default::default()
    };

    new_department.insert(db).await
}

pub async fn update_department(
    db: &DatabaseConnection,
    id: i32,
    input: DepartmentInput,
) -> Result<departments::Model, DbErr> {
    let department = departments::ActiveModel {
        id: Unchanged(id),
        name: Set(input.name.unwrap_or_default()),
        description: Set(input.description),
        ..Default::default()
    };

    department.update(db).await
}

/// Delete a department; its employees keep existing without one.
pub async fn delete_department(
    db: &DatabaseConnection,
    id: i32,
) -> Result<DeleteResult, DbErr> {
    departments::Entity::delete_by_id(id).exec(db).await
}
