use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{format_date, parse_date, parse_flag, parse_id, parse_number};

/// Headcount used when the submitted value cannot be read.
pub const MIN_EMPLOYEES: i32 = 1;

/// SeaORM entity for the `client_services` table: one service delivered to
/// one client over a date range.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub service_id: i32,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub number_of_employees: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id",
        on_delete = "Cascade"
    )]
    Service,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Assignment with the client's company name and the service name joined in.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ClientServiceRow {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub service_id: i32,
    pub service_name: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub number_of_employees: i32,
    pub is_active: bool,
}

// ── DTOs ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientServiceForm {
    pub id: Option<String>,
    pub client_id: Option<String>,
    pub service_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_employees: Option<String>,
    pub is_active: Option<String>,
}

impl ClientServiceForm {
    pub fn blank() -> Self {
        Self {
            number_of_employees: Some(MIN_EMPLOYEES.to_string()),
            is_active: Some("true".to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    /// Unparsable headcount falls back to 1; a parsed number is kept as-is so
    /// out-of-range values are rejected rather than clamped.
    pub fn parse(&self) -> ClientServiceInput {
        let number_of_employees = parse_number::<i64>(&self.number_of_employees)
            .map(|n| n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            .unwrap_or(MIN_EMPLOYEES);
        ClientServiceInput {
            client_id: parse_id(&self.client_id),
            service_id: parse_id(&self.service_id),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            number_of_employees,
            is_active: parse_flag(&self.is_active),
        }
    }
}

impl From<&Model> for ClientServiceForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            client_id: Some(m.client_id.to_string()),
            service_id: Some(m.service_id.to_string()),
            start_date: Some(format_date(&m.start_date)),
            end_date: m.end_date.as_ref().map(format_date),
            number_of_employees: Some(m.number_of_employees.to_string()),
            is_active: Some(m.is_active.to_string()),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ClientServiceInput {
    pub client_id: i32,
    pub service_id: i32,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    #[validate(range(
        min = 1,
        max = 1000,
        message = "Number of employees must be between 1 and 1000"
    ))]
    pub number_of_employees: i32,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(employees: Option<&str>) -> ClientServiceForm {
        ClientServiceForm {
            client_id: Some("1".into()),
            service_id: Some("2".into()),
            number_of_employees: employees.map(str::to_string),
            ..ClientServiceForm::default()
        }
    }

    #[test]
    fn headcount_boundaries() {
        for ok in ["1", "1000", "250"] {
            assert!(form(Some(ok)).parse().validate().is_ok(), "{ok} should pass");
        }
        for bad in ["0", "-5", "1001", "99999999999"] {
            assert!(form(Some(bad)).parse().validate().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn unparsable_headcount_defaults_to_one() {
        assert_eq!(form(Some("lots")).parse().number_of_employees, 1);
        assert_eq!(form(None).parse().number_of_employees, 1);
    }

    #[test]
    fn missing_selection_parses_to_zero() {
        let input = ClientServiceForm::default().parse();
        assert_eq!(input.client_id, 0);
        assert_eq!(input.service_id, 0);
        assert!(input.start_date.is_none());
        assert!(input.end_date.is_none());
    }
}
