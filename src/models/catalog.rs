// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog product. Pricing lives on the variants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(example = "Sunflower Cooking Oil")]
    pub name: String,

    #[schema(example = "consumable")]
    pub product_type: Option<String>,

    pub description: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One sellable variant of a product (size + unit + price). The
/// `selling_price` seeds `unit_price` when a line item is created from
/// a catalog selection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,

    #[schema(example = "5")]
    pub size: String,

    #[schema(example = "litre")]
    pub unit: String,

    #[schema(example = "850.00")]
    pub cost_price: Option<Decimal>,

    #[schema(example = "1100.00")]
    pub selling_price: Decimal,

    pub created_at: Option<DateTime<Utc>>,
}

/// Product with its variants, as the API returns it. Composed in the
/// repository, never read directly from a single row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithVariants {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}
