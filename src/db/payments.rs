use chrono::Utc;
use sea_orm::*;

use crate::models::payments::{self, PaymentInput, PaymentRow};
use crate::models::views::ListCounts;
use crate::models::{ListQuery, SortKey, SortOrder, clients};

/// Payments joined with the paying client.
pub(crate) fn payment_rows() -> Select<payments::Entity> {
    payments::Entity::find()
        .select_only()
        .columns([
            payments::Column::Id,
            payments::Column::ClientId,
            payments::Column::Amount,
            payments::Column::PaymentDate,
            payments::Column::PaymentMethod,
            payments::Column::Notes,
        ])
        .column_as(clients::Column::CompanyName, "client_name")
        .join(JoinType::InnerJoin, payments::Relation::Client.def())
}

/// Default order: newest payment first.
pub async fn list_payments(
    db: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Vec<PaymentRow>, DbErr> {
    let mut select = payment_rows();

    if let Some(term) = query.search_term() {
        select = select.filter(
            Condition::any()
                .add(clients::Column::CompanyName.contains(term))
                .add(payments::Column::PaymentMethod.contains(term))
                .add(payments::Column::Notes.contains(term)),
        );
    }

    let sort = query.sort_order().unwrap_or(SortOrder::desc(SortKey::Date));
    let select = match sort.key {
        SortKey::Amount => select.order_by(payments::Column::Amount, sort.order()),
        SortKey::Name => select.order_by(clients::Column::CompanyName, sort.order()),
        SortKey::Date | SortKey::Status => {
            select.order_by(payments::Column::PaymentDate, sort.order())
        }
    };

    select
        .order_by_desc(payments::Column::Id)
        .into_model::<PaymentRow>()
        .all(db)
        .await
}

/// Payments carry no active flag, so only the total is reported.
pub async fn count_payments(db: &DatabaseConnection) -> Result<ListCounts, DbErr> {
    Ok(ListCounts {
        total: payments::Entity::find().count(db).await?,
        active: None,
        inactive: None,
    })
}

pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find_by_id(id).one(db).await
}

/// Single payment with the client's company name.
pub async fn get_payment_row(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<PaymentRow>, DbErr> {
    payment_rows()
        .filter(payments::Column::Id.eq(id))
        .into_model::<PaymentRow>()
        .one(db)
        .await
}

pub async fn payment_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(payments::Entity::find_by_id(id).count(db).await? > 0)
}

/// Record a payment; a missing payment date becomes "now".
pub async fn insert_payment(
    db: &DatabaseConnection,
    input: PaymentInput,
) -> Result<payments::Model, DbErr> {
    let new_payment = payments::ActiveModel {
        client_id: Set(input.client_id),
        amount: Set(input.amount),
        payment_date: Set(input.payment_date.unwrap_or_else(Utc::now)),
        payment_method: Set(input.payment_method.unwrap_or_default()),
        notes: Set(input.notes),
        ..Default::default()
    };

    new_payment.insert(db).await
}

/// Rewrite payment `id`; a missing payment date keeps the stored one.
pub async fn update_payment(
    db: &DatabaseConnection,
    id: i32,
    input: PaymentInput,
) -> Result<payments::Model, DbErr> {
    let payment = payments::ActiveModel {
        id: Unchanged(id),
        client_id: Set(input.client_id),
        amount: Set(input.amount),
        payment_date: input.payment_date.map_or(NotSet, Set),
        payment_method: Set(input.payment_method.unwrap_or_default()),
        notes: Set(input.notes),
    };

    payment.update(db).await
}

pub async fn delete_payment(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    payments::Entity::delete_by_id(id).exec(db).await
}
