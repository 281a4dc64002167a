pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_services_table;
mod m20260105_000002_create_departments_table;
mod m20260105_000003_create_clients_table;
mod m20260105_000004_create_employees_table;
mod m20260105_000005_create_client_services_table;
mod m20260105_000006_create_payments_table;
mod m20260105_000007_add_reporting_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_services_table::Migration),
            Box::new(m20260105_000002_create_departments_table::Migration),
            Box::new(m20260105_000003_create_clients_table::Migration),
            Box::new(m20260105_000004_create_employees_table::Migration),
            Box::new(m20260105_000005_create_client_services_table::Migration),
            Box::new(m20260105_000006_create_payments_table::Migration),
            Box::new(m20260105_000007_add_reporting_indexes::Migration),
        ]
    }
}
