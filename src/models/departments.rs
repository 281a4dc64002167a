use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{parse_id, parse_text};

/// SeaORM entity for the `departments` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employees::Entity")]
    Employees,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl DepartmentForm {
    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    pub fn parse(&self) -> DepartmentInput {
        DepartmentInput {
            name: parse_text(&self.name),
            description: parse_text(&self.description),
        }
    }
}

impl From<&Model> for DepartmentForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            name: Some(m.name.clone()),
            description: m.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct DepartmentInput {
    #[validate(
        required(message = "Department Name is required"),
        length(max = 100, message = "Department Name cannot exceed 100 characters")
    )]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}
