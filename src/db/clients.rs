use chrono::Utc;
use sea_orm::*;

use crate::models::clients::{self, ClientInput};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder};

/// Clients matching the list filters. Default order: company name ascending.
pub async fn list_clients(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<clients::Model>, DbErr> {
    let mut select = clients::Entity::find();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(clients::Column::CompanyName.contains(term))
                .add(clients::Column::ContactPerson.contains(term))
                .add(clients::Column::Email.contains(term))
                .add(clients::Column::Phone.contains(term))
                .add(clients::Column::Address.contains(term)),
        );
    }
    if let Some(active) = query.active_filter() {
        select = select.filter(clients::Column::IsActive.eq(active));
    }

    let sort = query.sort_order().unwrap_or(SortOrder::asc(SortKey::Name));
    let column = match sort.key {
        SortKey::Date => clients::Column::RegistrationDate,
        SortKey::Status => clients::Column::IsActive,
        SortKey::Name | SortKey::Amount => clients::Column::CompanyName,
    };

    select
        .order_by(column, sort.order())
        .order_by_asc(clients::Column::Id)
        .all(db)
        .await
}

/// Unfiltered total/active/inactive counters.
pub async fn count_clients(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    let total = clients::Entity::find().count(db).await?;
    let active = clients::Entity::find()
        .filter(clients::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(ListCounts {
        total,
        active: Some(active),
        inactive: Some(total.saturating_sub(active)),
    })
}

/// Fetch a single client by ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find_by_id(id).one(db).await
}

pub async fn client_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(clients::Entity::find_by_id(id).count(db).await? > 0)
}

/// `(id, company name)` pairs of active clients for dropdowns.
pub async fn active_client_options(
    db: &DatabaseConnection,
) -> Result<Vec<(i32, String)>, DbErr> {
    clients::Entity::find()
        .select_only()
        .column(clients::Column::Id)
        .column(clients::Column::CompanyName)
        .filter(clients::Column::IsActive.eq(true))
        .order_by_asc(clients::Column::CompanyName)
        .into_tuple()
        .all(db)
        .await
}

/// Insert a new client; a missing registration date becomes "now".
pub async fn insert_client(
    db: &DatabaseConnection,
    input: ClientInput,
) -> Result<clients::Model, DbErr> {
    let new_client = clients::ActiveModel {
        company_name: Set(input.company_name.unwrap_or_default()),
        contact_person: Set(input.contact_person.unwrap_or_default()),
        email: Set(input.email.unwrap_or_default()),
        phone: Set(input.phone.unwrap_or_default()),
        address: Set(input.address),
        registration_date: Set(input.registration_date.unwrap_or_else(Utc::now)),
        is_active: Set(input.is_active),
        ..Default::default()
    };

    new_client.insert(db).await
}

/// Replace every editable column of client `id`. A missing registration
/// date keeps the stored one.
///
/// Fails with `DbErr::RecordNotUpdated` when no row was written.
pub async fn update_client(
    db: &DatabaseConnection,
    id: i32,
    input: ClientInput,
) -> Result<clients::Model, DbErr> {
    let client = clients::ActiveModel {
        id: Unchanged(id),
        company_name: Set(input.company_name.unwrap_or_default()),
        contact_person: Set(input.contact_person.unwrap_or_default()),
        email: Set(input.email.unwrap_or_default()),
        phone: Set(input.phone.unwrap_or_default()),
        address: Set(input.address),
        registration_date: input.registration_date.map_or(NotSet, Set),
        is_active: Set(input.is_active),
    };

    client.update(db).await
}

/// Delete a client by ID. Assignments and payments go with it (FK cascade).
pub async fn delete_client(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    clients::Entity::delete_by_id(id).exec(db).await
}
