// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::billing::InvoiceStatus;

/// Derived on every dashboard load from the full client/invoice/product
/// collections; never persisted. `Default` is the all-zero fallback the
/// handler serves when the upstream fetch fails.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_clients: i64,
    pub total_invoices: i64,
    pub total_products: i64,

    pub paid_invoices: i64,
    pub pending_invoices: i64,
    pub overdue_invoices: i64,

    #[schema(example = "125000.00")]
    pub total_revenue: Decimal,
    #[schema(example = "8500.00")]
    pub average_invoice_value: Decimal,

    pub top_clients: Vec<TopClientEntry>,
    pub recent_activity: Vec<ActivityEntry>,
    pub payment_stats: PaymentStats,
}

/// One row of the top-5 clients ranking (by total invoiced amount).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopClientEntry {
    pub client_id: Option<Uuid>,
    #[schema(example = "Savannah Traders Ltd")]
    pub client_name: String,
    pub total: Decimal,
    pub invoice_count: i64,
}

/// One row of the recent-activity feed (5 newest invoices).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub client_name: String,
    pub final_amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Denormalized view of the status counts, kept in sync by construction.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub paid: i64,
    pub pending: i64,
    pub overdue: i64,
}
