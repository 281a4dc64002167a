use chrono::Utc;
use sea_orm::*;

use crate::models::services::{self, ServiceInput};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder};

pub async fn list_services(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<services::Model>, DbErr> {
    let mut select = services::Entity::find();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(services::Column::Name.contains(term))
                .add(services::Column::Description.contains(term)),
        );
    }
    if let Some(active) = query.active_filter() {
        select = select.filter(services::Column::IsActive.eq(active));
    }

    let sort = query.sort_order().unwrap_or(SortOrder::asc(SortKey::Name));
    let column = match sort.key {
        SortKey::Date => services::Column::CreatedDate,
        SortKey::Status => services::Column::IsActive,
        SortKey::Amount => services::Column::DailyChargePerEmployee,
        SortKey::Name => services::Column::Name,
    };

    select
        .order_by(column, sort.order())
        .order_by_asc(services::Column::Id)
        .all(db)
        .await
}

pub async fn count_services(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    let total = services::Entity::find().count(db).await?;
    let active = services::Entity::find()
        .filter(services::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(ListCounts {
        total,
        active: Some(active),
        inactive: Some(total.saturating_sub(active)),
    })
}

/// Fetch a single service by ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

pub async fn service_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(services::Entity::find_by_id(id).count(db).await? > 0)
}

/// `(id, name)` pairs of active services for dropdowns.
pub async fn active_service_options(
    db: &DatabaseConnection,
) -> Result<Vec<(i32, String)>, DbErr> {
    services::Entity::find()
        .select_only()
        .column(services::Column::Id)
        .column(services::Column::Name)
        .filter(services::Column::IsActive.eq(true))
        .order_by_asc(services::Column::Name)
        .into_tuple()
        .all(db)
        .await
}

pub async fn insert_service(
    db: &DatabaseConnection,
    input: ServiceInput,
) -> Result<services::Model, DbErr> {
    let new_service = services::ActiveModel {
        name: Set(input.name.unwrap_or_default()),
        description: Set(input.description.unwrap_or_default()),
        daily_charge_per_employee: Set(input.daily_charge_per_employee.unwrap_or_default()),
        created_date: Set(Utc::now()),
        is_active: Set(input.is_active),
        ..Default::default()
    };

    new_service.insert(db).await
}

/// Replace the editable columns of service `id`; `created_date` is kept.
pub async fn update_service(
    db: &DatabaseConnection,
    id: i32,
    input: ServiceInput,
) -> Result<services::Model, DbErr> {
    let service = services::ActiveModel {
        id: Unchanged(id),
        name: Set(input.name.unwrap_or_default()),
        description: Set(input.description.unwrap_or_default()),
        daily_charge_per_employee: Set(input.daily_charge_per_employee.unwrap_or_default()),
        is_active: Set(input.is_active),
        ..Default::default()
    };

    service.update(db).await
}

/// Delete a service. Its assignments are removed, employees are detached.
pub async fn delete_service(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    services::Entity::delete_by_id(id).exec(db).await
}
