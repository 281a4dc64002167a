use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use sea_orm::*;

use crate::db::payments::payment_rows;
use crate::models::reports::{
    DashboardReport, HomeCounts, LATE_PAYMENT_WINDOW_DAYS, RECENT_PAYMENTS, ServiceUsageRow,
};
use crate::models::payments::PaymentRow;
use crate::models::{client_services, clients, departments, employees, payments, services};

/// Sum of every payment amount; `0.0` when there are none.
pub async fn total_payment_amount(db: &DatabaseConnection) -> Result<f64, DbErr> {
    let total: Option<Option<f64>> = payments::Entity::find()
        .select_only()
        .column_as(payments::Column::Amount.sum(), "total")
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(0.0))
}

/// Active assignments per service name. Every service appears, with zero when
/// unused; services sharing a name are added together.
pub async fn active_assignments_by_service(
    db: &DatabaseConnection,
) -> Result<BTreeMap<String, u64>, DbErr> {
    let all_services: Vec<(i32, String)> = services::Entity::find()
        .select_only()
        .column(services::Column::Id)
        .column(services::Column::Name)
        .into_tuple()
        .all(db)
        .await?;

    let counts: HashMap<i32, i64> = client_services::Entity::find()
        .select_only()
        .column(client_services::Column::ServiceId)
        .column_as(client_services::Column::Id.count(), "assignments")
        .filter(client_services::Column::IsActive.eq(true))
        .group_by(client_services::Column::ServiceId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut usage = BTreeMap::new();
    for (id, name) in all_services {
        let count = counts.get(&id).copied().unwrap_or(0) as u64;
        *usage.entry(name).or_insert(0) += count;
    }
    Ok(usage)
}

pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardReport, DbErr> {
    let recent_payments = payment_rows()
        .order_by_desc(payments::Column::PaymentDate)
        .order_by_desc(payments::Column::Id)
        .limit(RECENT_PAYMENTS)
        .into_model::<PaymentRow>()
        .all(db)
        .await?;

    Ok(DashboardReport {
        total_services: services::Entity::find().count(db).await?,
        total_departments: departments::Entity::find().count(db).await?,
        total_employees: employees::Entity::find().count(db).await?,
        total_clients: clients::Entity::find().count(db).await?,
        total_payments: payments::Entity::find().count(db).await?,
        total_payment_amount: total_payment_amount(db).await?,
        active_clients: clients::Entity::find()
            .filter(clients::Column::IsActive.eq(true))
            .count(db)
            .await?,
        active_services: services::Entity::find()
            .filter(services::Column::IsActive.eq(true))
            .count(db)
            .await?,
        recent_payments,
        service_usage: active_assignments_by_service(db).await?,
    })
}

/// Active clients with no payment dated on or after `now - 30 days`,
/// ordered by company name.
pub async fn late_payment_clients(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<clients::Model>, DbErr> {
    let cutoff = now - Duration::days(LATE_PAYMENT_WINDOW_DAYS);
    let recent_payers = payments::Entity::find()
        .select_only()
        .column(payments::Column::ClientId)
        .filter(payments::Column::PaymentDate.gte(cutoff))
        .distinct()
        .into_query();

    clients::Entity::find()
        .filter(clients::Column::IsActive.eq(true))
        .filter(clients::Column::Id.not_in_subquery(recent_payers))
        .order_by_asc(clients::Column::CompanyName)
        .order_by_asc(clients::Column::Id)
        .all(db)
        .await
}

/// Active assignments grouped by service name, busiest first.
pub async fn service_usage(db: &DatabaseConnection) -> Result<Vec<ServiceUsageRow>, DbErr> {
    let mut rows = client_services::Entity::find()
        .select_only()
        .column_as(services::Column::Name, "service_name")
        .column_as(client_services::Column::Id.count(), "client_count")
        .column_as(
            client_services::Column::NumberOfEmployees.sum(),
            "total_employees",
        )
        .join(JoinType::InnerJoin, client_services::Relation::Service.def())
        .filter(client_services::Column::IsActive.eq(true))
        .group_by(services::Column::Name)
        .into_model::<ServiceUsageRow>()
        .all(db)
        .await?;

    rows.sort_by(|a, b| {
        b.client_count
            .cmp(&a.client_count)
            .then_with(|| a.service_name.cmp(&b.service_name))
    });
    Ok(rows)
}

/// Clients ordered by company name.
pub async fn clients_by_name(db: &DatabaseConnection) -> Result<Vec<clients::Model>, DbErr> {
    clients::Entity::find()
        .order_by_asc(clients::Column::CompanyName)
        .order_by_asc(clients::Column::Id)
        .all(db)
        .await
}

pub async fn home_counts(db: &DatabaseConnection) -> Result<HomeCounts, DbErr> {
    Ok(HomeCounts {
        services: services::Entity::find().count(db).await?,
        departments: departments::Entity::find().count(db).await?,
        employees: employees::Entity::find().count(db).await?,
        clients: clients::Entity::find().count(db).await?,
        payments: payments::Entity::find().count(db).await?,
        total_payment_amount: total_payment_amount(db).await?,
    })
}
