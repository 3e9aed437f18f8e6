// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Single-row company profile. Feeds the PDF header and footer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub id: i32,

    #[schema(example = "Baraka Supplies Ltd")]
    pub company_name: String,

    // KRA PIN, printed on documents when present.
    #[schema(example = "P051234567X")]
    pub tax_pin: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    // Payment destination (e.g. an M-PESA paybill or bank account line);
    // rendered as a QR code on documents when present.
    #[schema(example = "M-PESA Paybill 400200 Acc 77812")]
    pub payment_account: Option<String>,

    #[schema(example = "KES")]
    pub currency: String,

    pub updated_at: Option<DateTime<Utc>>,
}
