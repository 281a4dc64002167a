use chrono::Utc;
use sea_orm::*;

use crate::models::{departments, services};

const STOCK_SERVICES: [(&str, &str, f64); 3] = [
    ("In-bound", "Receive calls from customers", 4500.0),
    ("Out-bound", "Call customers for promotions", 6000.0),
    ("Tele Marketing", "Sales and marketing calls", 5500.0),
];

const STOCK_DEPARTMENTS: [(&str, &str); 6] = [
    ("HR Management", "Human Resources Department"),
    ("Administration", "Administrative Operations"),
    ("Service", "Service Delivery Department"),
    ("Training", "Employee Training Department"),
    ("Internet Security", "IT Security and Support"),
    ("Auditors", "Auditing and Compliance"),
];

/// Insert the stock services and departments into an empty database.
///
/// Returns `false` without writing anything when services already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool, DbErr> {
    if services::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    services::Entity::insert_many(STOCK_SERVICES.iter().map(|(name, description, charge)| {
        services::ActiveModel {
            name: Set(String::from(*name)),
            description: Set(String::from(*description)),
            daily_charge_per_employee: Set(*charge),
            created_date: Set(now),
            is_active: Set(true),
            ..Default::default()
        }
    }))
    .exec(&txn)
    .await?;

    departments::Entity::insert_many(STOCK_DEPARTMENTS.iter().map(|(name, description)| {
        departments::ActiveModel {
            name: Set(String::from(*name)),
            description: Set(Some(String::from(*description))),
            created_date: Set(now),
            ..Default::default()
        }
    }))
    .exec(&txn)
    .await?;

    txn.commit().await?;
    Ok(true)
}
