use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Payments {
    Table,
    ClientId,
    PaymentDate,
}

#[derive(DeriveIden)]
enum ClientServices {
    Table,
    ServiceId,
    IsActive,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Late-payment lookups filter payments by date and project the client id.
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_payment_date_client_id")
                    .table(Payments::Table)
                    .col(Payments::PaymentDate)
                    .col(Payments::ClientId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_services_service_id_is_active")
                    .table(ClientServices::Table)
                    .col(ClientServices::ServiceId)
                    .col(ClientServices::IsActive)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_client_services_service_id_is_active")
                    .table(ClientServices::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_payments_payment_date_client_id")
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await
    }
}
