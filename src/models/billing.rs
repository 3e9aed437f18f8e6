// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (mapping the Postgres types) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quotation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(example = "INV-00042")]
    pub invoice_number: String,

    pub client_id: Option<Uuid>,
    pub status: InvoiceStatus,

    // Inputs to the totals computation
    #[schema(example = "10.00")]
    pub discount: Option<Decimal>,
    #[schema(example = "16.00")]
    pub vat_rate: Option<Decimal>,

    // Derived amounts; always recomputed together, never written one by one.
    #[schema(example = "200.00")]
    pub subtotal: Decimal,
    #[schema(example = "32.00")]
    pub vat_amount: Decimal,
    #[schema(example = "222.00")]
    pub final_amount: Decimal,

    pub amount_paid: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2026-09-30")]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: Uuid,

    #[schema(example = "QUO-00017")]
    pub quotation_number: String,

    pub client_id: Option<Uuid>,
    pub status: QuotationStatus,

    pub discount: Option<Decimal>,
    pub vat_rate: Option<Decimal>,

    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub final_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-15")]
    pub valid_until: Option<NaiveDate>,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Persisted line item. Shared between invoices and quotations; the
/// parent id column is deliberately not selected so one shape serves both.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,

    #[schema(example = "Sunflower Cooking Oil 5 litre")]
    pub description: String,

    #[schema(example = "2")]
    pub quantity: Decimal,
    #[schema(example = "100.00")]
    pub unit_price: Decimal,
    #[schema(example = "200.00")]
    pub line_total: Decimal,
}

/// Transient line item, as it arrives on create/update payloads.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub product_id: Option<Uuid>,

    #[validate(length(min = 1, message = "The item description is required."))]
    pub description: String,

    #[validate(custom(function = validate_positive))]
    pub quantity: Decimal,

    #[validate(custom(function = validate_not_negative))]
    pub unit_price: Decimal,
}

/// The three derived figures of a financial document. Produced by the
/// totals calculator; full precision, rounding is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub final_amount: Decimal,
}

impl DocumentTotals {
    /// Copy rounded to 2 decimal places for currency display.
    pub fn rounded(&self) -> DocumentTotals {
        let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        DocumentTotals {
            subtotal: round(self.subtotal),
            vat_amount: round(self.vat_amount),
            final_amount: round(self.final_amount),
        }
    }
}

/// Invoice with its line items, as returned by detail endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<DocumentItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDetail {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub items: Vec<DocumentItem>,
}

// --- Shared field validators ---

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("The value must be greater than zero.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("The value must not be negative.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_vat_rate(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("The VAT rate must be between 0 and 100.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, unit_price: Decimal) -> ItemInput {
        ItemInput {
            product_id: None,
            description: "Test item".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(item(dec!(0), dec!(10)).validate().is_err());
    }

    #[test]
    fn rejects_negative_unit_price() {
        assert!(item(dec!(1), dec!(-0.01)).validate().is_err());
    }

    #[test]
    fn accepts_free_of_charge_line() {
        assert!(item(dec!(1), dec!(0)).validate().is_ok());
    }

    #[test]
    fn rejects_blank_description() {
        let mut it = item(dec!(1), dec!(10));
        it.description = String::new();
        assert!(it.validate().is_err());
    }

    #[test]
    fn vat_rate_bounds_are_inclusive() {
        assert!(validate_vat_rate(&dec!(0)).is_ok());
        assert!(validate_vat_rate(&dec!(100)).is_ok());
        assert!(validate_vat_rate(&dec!(100.01)).is_err());
        assert!(validate_vat_rate(&dec!(-1)).is_err());
    }

    #[test]
    fn rounding_is_display_only() {
        let totals = DocumentTotals {
            subtotal: dec!(10.005),
            vat_amount: dec!(1.6008),
            final_amount: dec!(11.6058),
        };
        let rounded = totals.rounded();
        assert_eq!(rounded.subtotal, dec!(10.01));
        assert_eq!(rounded.vat_amount, dec!(1.60));
        assert_eq!(rounded.final_amount, dec!(11.61));
        // The original keeps full precision.
        assert_eq!(totals.subtotal, dec!(10.005));
    }
}
