// src/models/clients.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A client the business quotes and invoices. Referenced by financial
/// documents through `client_id` (a weak reference, never ownership).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Savannah Traders Ltd")]
    pub company_name: String,

    #[schema(example = "accounts@savannahtraders.co.ke")]
    pub company_email: String,

    pub contact_person: Option<String>,

    #[schema(example = "+254 712 345678")]
    pub phone: Option<String>,

    pub address: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
