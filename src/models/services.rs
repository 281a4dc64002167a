use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{parse_flag, parse_id, parse_number, parse_text};

/// SeaORM entity for the `services` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub daily_charge_per_employee: f64,
    pub created_date: DateTimeUtc,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_services::Entity")]
    ClientServices,
    #[sea_orm(has_many = "super::employees::Entity")]
    Employees,
}

impl Related<super::client_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientServices.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub daily_charge_per_employee: Option<String>,
    pub is_active: Option<String>,
}

impl ServiceForm {
    pub fn blank() -> Self {
        Self {
            is_active: Some("true".to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    /// A blank charge stays absent (required); garbage coerces to 0.
    pub fn parse(&self) -> ServiceInput {
        let daily_charge_per_employee = parse_text(&self.daily_charge_per_employee)
            .map(|_| parse_number::<f64>(&self.daily_charge_per_employee).unwrap_or(0.0));
        ServiceInput {
            name: parse_text(&self.name),
            description: parse_text(&self.description),
            daily_charge_per_employee,
            is_active: parse_flag(&self.is_active),
        }
    }
}

impl From<&Model> for ServiceForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            name: Some(m.name.clone()),
            description: Some(m.description.clone()),
            daily_charge_per_employee: Some(m.daily_charge_per_employee.to_string()),
            is_active: Some(m.is_active.to_string()),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ServiceInput {
    #[validate(
        required(message = "Service Name is required"),
        length(max = 100, message = "Service Name cannot exceed 100 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Description is required"),
        length(max = 500, message = "Description cannot exceed 500 characters")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "Daily Charge per Employee is required"),
        range(min = 0.0, message = "Charge must be a positive value")
    )]
    pub daily_charge_per_employee: Option<f64>,
    pub is_active: bool,
}
