//! Read-only report documents.

use std::collections::BTreeMap;

use sea_orm::FromQueryResult;
use serde::Serialize;

use super::client_services::ClientServiceRow;
use super::clients;
use super::payments::PaymentRow;

/// Number of payments shown on the dashboard.
pub const RECENT_PAYMENTS: u64 = 5;

/// A client counts as late when it has no payment in this many days.
pub const LATE_PAYMENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_services: u64,
    pub total_departments: u64,
    pub total_employees: u64,
    pub total_clients: u64,
    pub total_payments: u64,
    pub total_payment_amount: f64,
    pub active_clients: u64,
    pub active_services: u64,
    pub recent_payments: Vec<PaymentRow>,
    /// Service name -> number of active assignments.
    pub service_usage: BTreeMap<String, u64>,
}

/// Active clients without a payment inside the late-payment window.
///
/// This is an approximation: there are no invoices or due dates.
#[derive(Debug, Clone, Serialize)]
pub struct LatePaymentsReport {
    pub report_date: String,
    pub window_days: i64,
    pub clients: Vec<clients::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ServiceUsageRow {
    pub service_name: String,
    pub client_count: i64,
    pub total_employees: i64,
}

/// Clients by name plus every assignment; correlation is left to the reader.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummaryReport {
    pub clients: Vec<clients::Model>,
    pub client_services: Vec<ClientServiceRow>,
}

/// Summary counters on the signed-in home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeCounts {
    pub services: u64,
    pub departments: u64,
    pub employees: u64,
    pub clients: u64,
    pub payments: u64,
    pub total_payment_amount: f64,
}
