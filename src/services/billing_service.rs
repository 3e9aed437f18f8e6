// src/services/billing_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BillingRepository,
    models::billing::{
        Invoice, InvoiceDetail, InvoiceStatus, ItemInput, Quotation, QuotationDetail,
        QuotationStatus,
    },
    services::totals,
};

// Business rules for quotations and invoices. The three derived amounts
// are recomputed here on every write so they can never drift from the
// items; handlers validate payloads before calling in.
#[derive(Clone)]
pub struct BillingService {
    repo: BillingRepository,
}

impl BillingService {
    pub fn new(repo: BillingRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  QUOTATIONS
    // =========================================================================

    pub async fn create_quotation(
        &self,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        valid_until: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<QuotationDetail, AppError> {
        let computed = totals::compute_totals(
            items,
            discount.unwrap_or(Decimal::ZERO),
            vat_rate.unwrap_or(Decimal::ZERO),
        );

        self.repo
            .create_quotation(
                client_id,
                QuotationStatus::Draft,
                discount,
                vat_rate,
                &computed,
                valid_until,
                notes,
                items,
            )
            .await
    }

    pub async fn list_quotations(&self) -> Result<Vec<Quotation>, AppError> {
        self.repo.list_quotations().await
    }

    pub async fn get_quotation_detail(&self, id: Uuid) -> Result<QuotationDetail, AppError> {
        let quotation = self
            .repo
            .find_quotation(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;
        let items = self.repo.list_quotation_items(id).await?;

        Ok(QuotationDetail { quotation, items })
    }

    pub async fn update_quotation(
        &self,
        id: Uuid,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        valid_until: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<QuotationDetail, AppError> {
        let computed = totals::compute_totals(
            items,
            discount.unwrap_or(Decimal::ZERO),
            vat_rate.unwrap_or(Decimal::ZERO),
        );

        self.repo
            .update_quotation(
                id, client_id, discount, vat_rate, &computed, valid_until, notes, items,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))
    }

    pub async fn delete_quotation(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_quotation(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Quotation".to_string()));
        }
        Ok(())
    }

    /// Turns an accepted quotation into a draft invoice carrying the same
    /// client, discount, VAT rate and items. Totals are recomputed rather
    /// than copied.
    pub async fn convert_quotation_to_invoice(&self, id: Uuid) -> Result<InvoiceDetail, AppError> {
        let detail = self.get_quotation_detail(id).await?;

        let items: Vec<ItemInput> = detail
            .items
            .iter()
            .map(|item| ItemInput {
                product_id: item.product_id,
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        let quotation = &detail.quotation;
        let invoice = self
            .create_invoice(
                quotation.client_id,
                quotation.discount,
                quotation.vat_rate,
                None,
                quotation.notes.as_deref(),
                &items,
            )
            .await?;

        self.repo
            .set_quotation_status(id, QuotationStatus::Accepted)
            .await?;

        tracing::info!(
            quotation = %quotation.quotation_number,
            invoice = %invoice.invoice.invoice_number,
            "Quotation converted to invoice"
        );

        Ok(invoice)
    }

    // =========================================================================
    //  INVOICES
    // =========================================================================

    pub async fn create_invoice(
        &self,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<InvoiceDetail, AppError> {
        let computed = totals::compute_totals(
            items,
            discount.unwrap_or(Decimal::ZERO),
            vat_rate.unwrap_or(Decimal::ZERO),
        );

        self.repo
            .create_invoice(
                client_id,
                InvoiceStatus::Draft,
                discount,
                vat_rate,
                &computed,
                due_date,
                notes,
                items,
            )
            .await
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        self.repo.list_invoices().await
    }

    pub async fn get_invoice_detail(&self, id: Uuid) -> Result<InvoiceDetail, AppError> {
        let invoice = self
            .repo
            .find_invoice(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;
        let items = self.repo.list_invoice_items(id).await?;

        Ok(InvoiceDetail { invoice, items })
    }

    pub async fn update_invoice(
        &self,
        id: Uuid,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<InvoiceDetail, AppError> {
        let computed = totals::compute_totals(
            items,
            discount.unwrap_or(Decimal::ZERO),
            vat_rate.unwrap_or(Decimal::ZERO),
        );

        self.repo
            .update_invoice(
                id, client_id, discount, vat_rate, &computed, due_date, notes, items,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))
    }

    pub async fn set_invoice_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        self.repo
            .set_invoice_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))
    }

    pub async fn record_payment(&self, id: Uuid, amount: Decimal) -> Result<Invoice, AppError> {
        self.repo
            .add_invoice_payment(id, amount)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))
    }

    pub async fn delete_invoice(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_invoice(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Invoice".to_string()));
        }
        Ok(())
    }
}
