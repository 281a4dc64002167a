use chrono::Utc;
use sea_orm::*;

use crate::models::client_services::{self, ClientServiceInput, ClientServiceRow};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder, clients, services};

/// Assignments joined with their client and service.
fn assignment_rows() -> Select<client_services::Entity> {
    client_services::Entity::find()
        .select_only()
        .columns([
            client_services::Column::Id,
            client_services::Column::ClientId,
            client_services::Column::ServiceId,
            client_services::Column::StartDate,
            client_services::Column::EndDate,
            client_services::Column::NumberOfEmployees,
            client_services::Column::IsActive,
        ])
        .column_as(clients::Column::CompanyName, "client_name")
        .column_as(services::Column::Name, "service_name")
        .join(JoinType::InnerJoin, client_services::Relation::Client.def())
        .join(JoinType::InnerJoin, client_services::Relation::Service.def())
}

/// Default order: client company name ascending.
pub async fn list_client_services(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<ClientServiceRow>, DbErr> {
    let mut select = assignment_rows();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(clients::Column::CompanyName.contains(term))
                .add(services::Column::Name.contains(term)),
        );
    }
    if let Some(active) = query.active_filter() {
        select = select.filter(client_services::Column::IsActive.eq(active));
    }

    let sort = query.sort_order().unwrap_or(SortOrder::asc(SortKey::Name));
    select = match sort.key {
        SortKey::Date => select.order_by(client_services::Column::StartDate, sort.order()),
        SortKey::Status => select.order_by(client_services::Column::IsActive, sort.order()),
        SortKey::Amount => {
            select.order_by(client_services::Column::NumberOfEmployees, sort.order())
        }
        SortKey::Name => select
            .order_by(clients::Column::CompanyName, sort.order())
            .order_by(services::Column::Name, sort.order()),
    };

    select
        .order_by_asc(client_services::Column::Id)
        .into_model::<ClientServiceRow>()
        .all(db)
        .await
}

/// Every assignment, unfiltered, in client then service order.
pub async fn all_client_service_rows(
    db: &DatabaseConnection,
) -> Result<Vec<ClientServiceRow>, DbErr> {
    assignment_rows()
        .order_by_asc(clients::Column::CompanyName)
        .order_by_asc(services::Column::Name)
        .order_by_asc(client_services::Column::Id)
        .into_model::<ClientServiceRow>()
        .all(db)
        .await
}

pub async fn count_client_services(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    let total = client_services::Entity::find().count(db).await?;
    let active = client_services::Entity::find()
        .filter(client_services::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(ListCounts {
        total,
        active: Some(active),
        inactive: Some(total.saturating_sub(active)),
    })
}

pub async fn get_client_service_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<client_services::Model>, DbErr> {
    client_services::Entity::find_by_id(id).one(db).await
}

/// Single assignment with client and service names.
pub async fn get_client_service_row(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<ClientServiceRow>, DbErr> {
    assignment_rows()
        .filter(client_services::Column::Id.eq(id))
        .into_model::<ClientServiceRow>()
        .one(db)
        .await
}

pub async fn client_service_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(client_services::Entity::find_by_id(id).count(db).await? > 0)
}

/// Insert a new assignment; a missing start date becomes "now".
pub async fn insert_client_service(
    db: &DatabaseConnection,
    input: ClientServiceInput,
) -> Result<client_services::Model, DbErr> {
    let new_assignment = client_services::ActiveModel {
        client_id: Set(input.client_id),
        service_id: Set(input.service_id),
        start_date: Set(input.start_date.unwrap_or_else(Utc::now)),
        end_date: Set(input.end_date),
        number_of_employees: Set(input.number_of_employees),
        is_active: Set(input.is_active),
        ..Default::default()
    };

    new_assignment.insert(db).await
}

/// Rewrite assignment `id`; a missing start date keeps the stored one.
pub async fn update_client_service(
    db: &DatabaseConnection,
    id: i32,
    input: ClientServiceInput,
) -> Result<client_services::Model, DbErr> {
    let assignment = client_services::ActiveModel {
        id: Unchanged(id),
        client_id: Set(input.client_id),
        service_id: Set(input.service_id),
        start_date: input.start_date.map_or(NotSet, Set),
        end_date: Set(input.end_date),
        number_of_employees: Set(input.number_of_employees),
        is_active: Set(input.is_active),
    };

    assignment.update(db).await
}

pub async fn delete_client_service(
    db: &DatabaseConnection,
    id: i32,
) -> Result<DeleteResult, DbErr> {
    client_services::Entity::delete_by_id(id).exec(db).await
}
