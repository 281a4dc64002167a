pub mod client_services;
pub mod clients;
pub mod departments;
pub mod employees;
pub mod payments;
pub mod reports;
pub mod seed;
pub mod services;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a SeaORM connection pool for `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
