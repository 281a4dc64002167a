#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use excellon_backoffice::auth::jwt::Claims;
use excellon_backoffice::auth::middleware::JwtSecret;
use excellon_backoffice::db::{client_services, clients, payments, services};
use excellon_backoffice::handlers;
use excellon_backoffice::models::client_services::ClientServiceInput;
use excellon_backoffice::models::clients::ClientInput;
use excellon_backoffice::models::payments::PaymentInput;
use excellon_backoffice::models::services::ServiceInput;
use excellon_backoffice::models::{client_services as assignment, clients as client, payments as payment, services as service};
use migration::{Migrator, MigratorTrait};

/// A fake secret for testing.
pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Fresh in-memory database with the full schema.
pub async fn test_db() -> web::Data<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    web::Data::new(db)
}

pub fn app(
    db: web::Data<DatabaseConnection>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(db)
        .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
        .configure(handlers::init_routes)
}

/// Mint an HS256 token the way the identity provider would.
pub fn mint_test_token(role: Option<&str>, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (now + exp_offset_secs) as usize,
        iat: Some(now as usize),
        email: Some("admin@excellon.test".to_string()),
        role: role.map(str::to_string),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", mint_test_token(None, 3600)))
}

pub async fn add_client(
    db: &DatabaseConnection,
    company_name: &str,
    is_active: bool,
) -> client::Model {
    clients::insert_client(
        db,
        ClientInput {
            company_name: Some(company_name.to_string()),
            contact_person: Some("Pat Contact".to_string()),
            email: Some("pat@example.com".to_string()),
            phone: Some("+1 555 000 1111".to_string()),
            address: None,
            registration_date: None,
            is_active,
        },
    )
    .await
    .expect("Failed to insert client")
}

pub async fn add_service(db: &DatabaseConnection, name: &str, is_active: bool) -> service::Model {
    services::insert_service(
        db,
        ServiceInput {
            name: Some(name.to_string()),
            description: Some(format!("{name} calls")),
            daily_charge_per_employee: Some(4500.0),
            is_active,
        },
    )
    .await
    .expect("Failed to insert service")
}

pub async fn assign(
    db: &DatabaseConnection,
    client_id: i32,
    service_id: i32,
    number_of_employees: i32,
    is_active: bool,
) -> assignment::Model {
    client_services::insert_client_service(
        db,
        ClientServiceInput {
            client_id,
            service_id,
            start_date: None,
            end_date: None,
            number_of_employees,
            is_active,
        },
    )
    .await
    .expect("Failed to insert assignment")
}

pub async fn pay(
    db: &DatabaseConnection,
    client_id: i32,
    amount: f64,
    payment_date: DateTime<Utc>,
) -> payment::Model {
    payments::insert_payment(
        db,
        PaymentInput {
            client_id,
            amount,
            payment_date: Some(payment_date),
            payment_method: Some("Cash".to_string()),
            notes: None,
        },
    )
    .await
    .expect("Failed to insert payment")
}
