use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{
    format_date, parse_date, parse_flag, parse_id, parse_optional_id, parse_text,
};

/// SeaORM entity for the `employees` table.
///
/// Both references are nullable and are cleared (not cascaded) when the
/// department or service is deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub hire_date: Option<DateTimeUtc>,
    pub is_active: bool,
    pub department_id: Option<i32>,
    pub service_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id",
        on_delete = "SetNull"
    )]
    Service,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Employee with department and service names joined in.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct EmployeeRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub hire_date: Option<DateTimeUtc>,
    pub is_active: bool,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub service_id: Option<i32>,
    pub service_name: Option<String>,
}

// ── DTOs ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeForm {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub hire_date: Option<String>,
    pub is_active: Option<String>,
    pub department_id: Option<String>,
    pub service_id: Option<String>,
}

impl EmployeeForm {
    pub fn blank() -> Self {
        Self {
            is_active: Some("true".to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    pub fn parse(&self) -> EmployeeInput {
        EmployeeInput {
            first_name: parse_text(&self.first_name),
            last_name: parse_text(&self.last_name),
            email: parse_text(&self.email),
            phone: parse_text(&self.phone),
            designation: parse_text(&self.designation),
            hire_date: parse_date(&self.hire_date),
            is_active: parse_flag(&self.is_active),
            department_id: parse_optional_id(&self.department_id),
            service_id: parse_optional_id(&self.service_id),
        }
    }
}

impl From<&Model> for EmployeeForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            first_name: Some(m.first_name.clone()),
            last_name: Some(m.last_name.clone()),
            email: m.email.clone(),
            phone: m.phone.clone(),
            designation: m.designation.clone(),
            hire_date: m.hire_date.as_ref().map(format_date),
            is_active: Some(m.is_active.to_string()),
            department_id: m.department_id.map(|id| id.to_string()),
            service_id: m.service_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct EmployeeInput {
    #[validate(
        required(message = "First Name is required"),
        length(max = 100, message = "First Name cannot exceed 100 characters")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last Name is required"),
        length(max = 100, message = "Last Name cannot exceed 100 characters")
    )]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "Designation cannot exceed 100 characters"))]
    pub designation: Option<String>,
    pub hire_date: Option<DateTimeUtc>,
    pub is_active: bool,
    pub department_id: Option<i32>,
    pub service_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::field_errors;

    #[test]
    fn only_names_are_required() {
        let form = EmployeeForm {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            department_id: Some("0".into()),
            service_id: Some("".into()),
            ..EmployeeForm::default()
        };
        let input = form.parse();
        assert!(input.validate().is_ok());
        assert_eq!(input.department_id, None);
        assert_eq!(input.service_id, None);
        assert!(input.is_active);
    }

    #[test]
    fn optional_contact_fields_are_still_checked() {
        let form = EmployeeForm {
            email: Some("nope".into()),
            phone: Some("??".into()),
            ..EmployeeForm::default()
        };
        let errors = field_errors(&form.parse().validate().unwrap_err());
        assert_eq!(errors["first_name"], vec!["First Name is required"]);
        assert_eq!(errors["last_name"], vec!["Last Name is required"]);
        assert_eq!(errors["email"], vec!["Invalid email address"]);
        assert_eq!(errors["phone"], vec!["Invalid phone number"]);
    }
}
