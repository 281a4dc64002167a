use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{format_date, parse_date, parse_id, parse_number, parse_text};

pub const DEFAULT_PAYMENT_METHOD: &str = "Bank Transfer";

/// SeaORM entity for the `payments` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub payment_date: DateTimeUtc,
    pub payment_method: String,
    pub notes: Option<String>,
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
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payment with the paying client's company name.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct PaymentRow {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub amount: f64,
    pub payment_date: DateTimeUtc,
    pub payment_method: String,
    pub notes: Option<String>,
}

// ── DTOs ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentForm {
    pub id: Option<String>,
    pub client_id: Option<String>,
    pub amount: Option<String>,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl PaymentForm {
    pub fn blank() -> Self {
        Self {
            payment_method: Some(DEFAULT_PAYMENT_METHOD.to_string()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i32 {
        parse_id(&self.id)
    }

    /// Unparsable amounts coerce to 0 and fail the range rule; a blank method
    /// becomes the default.
    pub fn parse(&self) -> PaymentInput {
        PaymentInput {
            client_id: parse_id(&self.client_id),
            amount: parse_number::<f64>(&self.amount)
                .filter(|a| a.is_finite())
                .unwrap_or(0.0),
            payment_date: parse_date(&self.payment_date),
            payment_method: Some(
                parse_text(&self.payment_method)
                    .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            ),
            notes: parse_text(&self.notes),
        }
    }
}

impl From<&Model> for PaymentForm {
    fn from(m: &Model) -> Self {
        Self {
            id: Some(m.id.to_string()),
            client_id: Some(m.client_id.to_string()),
            amount: Some(format!("{:.2}", m.amount)),
            payment_date: Some(format_date(&m.payment_date)),
            payment_method: Some(m.payment_method.clone()),
            notes: m.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct PaymentInput {
    pub client_id: i32,
    #[validate(range(min = 0.01, message = "Amount must be greater than 0"))]
    pub amount: f64,
    pub payment_date: Option<DateTimeUtc>,
    #[validate(
        required(message = "Payment method is required"),
        length(max = 50, message = "Payment method cannot exceed 50 characters")
    )]
    pub payment_method: Option<String>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::field_errors;

    fn form(amount: &str) -> PaymentForm {
        PaymentForm {
            client_id: Some("1".into()),
            amount: Some(amount.into()),
            ..PaymentForm::default()
        }
    }

    #[test]
    fn amount_boundaries() {
        assert!(form("0.01").parse().validate().is_ok());
        assert!(form("1500").parse().validate().is_ok());
        for bad in ["0", "-10", "0.001", "abc", "NaN"] {
            let errors = field_errors(&form(bad).parse().validate().unwrap_err());
            assert_eq!(errors["amount"], vec!["Amount must be greater than 0"], "{bad}");
        }
    }

    #[test]
    fn blank_method_defaults_to_bank_transfer() {
        let input = form("10").parse();
        assert_eq!(input.payment_method.as_deref(), Some(DEFAULT_PAYMENT_METHOD));

        let mut cash = form("10");
        cash.payment_method = Some("Cash".into());
        assert_eq!(cash.parse().payment_method.as_deref(), Some("Cash"));
    }
}
