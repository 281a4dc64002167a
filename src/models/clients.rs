use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{format_date, parse_date, parse_flag, parse_id, parse_text};

/// SeaORM entity for the `clients` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub registration_date: DateTimeUtc,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_services::Entity")]
    ClientServices,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::client_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientServices.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Raw create/edit form as submitted; also echoed back on re-render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientForm {
    pub id: Option<String>,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub registration_date: Option<String>,
    pub is_active: Option<String>,
}

impl ClientForm {
    /// Blank create form: new clients start active.
    pub fn blank() -> Self {
        Self {
            is_active: Some("true".to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    pub fn parse(&self) -> ClientInput {
        ClientInput {
            company_name: parse_text(&self.company_name),
            contact_person: parse_text(&self.contact_person),
            email: parse_text(&self.email),
            phone: parse_text(&self.phone),
            address: parse_text(&self.address),
            registration_date: parse_date(&self.registration_date),
            is_active: parse_flag(&self.is_active),
        }
    }
}

impl From<&Model> for ClientForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            company_name: Some(m.company_name.clone()),
            contact_person: Some(m.contact_person.clone()),
            email: Some(m.email.clone()),
            phone: Some(m.phone.clone()),
            address: m.address.clone(),
            registration_date: Some(format_date(&m.registration_date)),
            is_active: Some(m.is_active.to_string()),
        }
    }
}

/// Typed, validated client fields.
#[derive(Debug, Clone, Validate)]
pub struct ClientInput {
    #[validate(
        required(message = "Company Name is required"),
        length(max = 200, message = "Company Name cannot exceed 200 characters")
    )]
    pub company_name: Option<String>,
    #[validate(
        required(message = "Contact Person is required"),
        length(max = 100, message = "Contact Person cannot exceed 100 characters")
    )]
    pub contact_person: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Phone is required"),
        custom(function = "crate::validation::validate_phone")
    )]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
    pub address: Option<String>,
    pub registration_date: Option<DateTimeUtc>,
    pub is_active: bool,
}
