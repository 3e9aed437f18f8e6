// src/db/billing_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{
        DocumentItem, DocumentTotals, Invoice, InvoiceDetail, InvoiceStatus, ItemInput, Quotation,
        QuotationDetail, QuotationStatus,
    },
    services::totals,
};

const ITEM_COLUMNS: &str = "id, product_id, description, quantity, unit_price, line_total";

// Repository for financial documents (quotations and invoices) and their
// line items. Writes that touch a parent row and its items run in one
// transaction so the derived totals can never drift from the items.
#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  INVOICES
    // =========================================================================

    pub async fn create_invoice(
        &self,
        client_id: Option<Uuid>,
        status: InvoiceStatus,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        totals: &DocumentTotals,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<InvoiceDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let number: i64 = sqlx::query_scalar("SELECT nextval('invoice_number_seq')")
            .fetch_one(&mut *tx)
            .await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                invoice_number, client_id, status, discount, vat_rate,
                subtotal, vat_amount, final_amount, due_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(format!("INV-{:05}", number))
        .bind(client_id)
        .bind(status)
        .bind(discount)
        .bind(vat_rate)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.final_amount)
        .bind(due_date)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        let saved_items = insert_invoice_items(&mut tx, invoice.id, items).await?;

        tx.commit().await?;

        Ok(InvoiceDetail {
            invoice,
            items: saved_items,
        })
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(invoices)
    }

    pub async fn find_invoice(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn list_invoice_items(&self, invoice_id: Uuid) -> Result<Vec<DocumentItem>, AppError> {
        let items = sqlx::query_as::<_, DocumentItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = $1 ORDER BY id"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Rewrites an invoice and its items together with freshly computed
    /// totals. Returns `None` when the invoice does not exist.
    pub async fn update_invoice(
        &self,
        id: Uuid,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        totals: &DocumentTotals,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<Option<InvoiceDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(invoice) = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET client_id = $2, discount = $3, vat_rate = $4,
                subtotal = $5, vat_amount = $6, final_amount = $7,
                due_date = $8, notes = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(discount)
        .bind(vat_rate)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.final_amount)
        .bind(due_date)
        .bind(notes)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let saved_items = insert_invoice_items(&mut tx, id, items).await?;

        tx.commit().await?;

        Ok(Some(InvoiceDetail {
            invoice,
            items: saved_items,
        }))
    }

    pub async fn set_invoice_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Accumulates a payment. The status flips to paid only once the
    /// accumulated amount covers the final amount; revenue recognition
    /// elsewhere keys off that status, not off `amount_paid`.
    pub async fn add_invoice_payment(
        &self,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Option<Invoice>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(current) =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        let new_paid = current.amount_paid.unwrap_or(Decimal::ZERO) + amount;
        let new_status = if new_paid >= current.final_amount {
            InvoiceStatus::Paid
        } else {
            current.status
        };

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET amount_paid = $2, status = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_paid)
        .bind(new_status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(invoice))
    }

    pub async fn delete_invoice(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  QUOTATIONS
    // =========================================================================

    pub async fn create_quotation(
        &self,
        client_id: Option<Uuid>,
        status: QuotationStatus,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        totals: &DocumentTotals,
        valid_until: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<QuotationDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let number: i64 = sqlx::query_scalar("SELECT nextval('quotation_number_seq')")
            .fetch_one(&mut *tx)
            .await?;

        let quotation = sqlx::query_as::<_, Quotation>(
            r#"
            INSERT INTO quotations (
                quotation_number, client_id, status, discount, vat_rate,
                subtotal, vat_amount, final_amount, valid_until, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(format!("QUO-{:05}", number))
        .bind(client_id)
        .bind(status)
        .bind(discount)
        .bind(vat_rate)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.final_amount)
        .bind(valid_until)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        let saved_items = insert_quotation_items(&mut tx, quotation.id, items).await?;

        tx.commit().await?;

        Ok(QuotationDetail {
            quotation,
            items: saved_items,
        })
    }

    pub async fn list_quotations(&self) -> Result<Vec<Quotation>, AppError> {
        let quotations =
            sqlx::query_as::<_, Quotation>("SELECT * FROM quotations ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(quotations)
    }

    pub async fn find_quotation(&self, id: Uuid) -> Result<Option<Quotation>, AppError> {
        let quotation = sqlx::query_as::<_, Quotation>("SELECT * FROM quotations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quotation)
    }

    pub async fn list_quotation_items(
        &self,
        quotation_id: Uuid,
    ) -> Result<Vec<DocumentItem>, AppError> {
        let items = sqlx::query_as::<_, DocumentItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM quotation_items WHERE quotation_id = $1 ORDER BY id"
        ))
        .bind(quotation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn update_quotation(
        &self,
        id: Uuid,
        client_id: Option<Uuid>,
        discount: Option<Decimal>,
        vat_rate: Option<Decimal>,
        totals: &DocumentTotals,
        valid_until: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[ItemInput],
    ) -> Result<Option<QuotationDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(quotation) = sqlx::query_as::<_, Quotation>(
            r#"
            UPDATE quotations
            SET client_id = $2, discount = $3, vat_rate = $4,
                subtotal = $5, vat_amount = $6, final_amount = $7,
                valid_until = $8, notes = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(discount)
        .bind(vat_rate)
        .bind(totals.subtotal)
        .bind(totals.vat_amount)
        .bind(totals.final_amount)
        .bind(valid_until)
        .bind(notes)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM quotation_items WHERE quotation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let saved_items = insert_quotation_items(&mut tx, id, items).await?;

        tx.commit().await?;

        Ok(Some(QuotationDetail {
            quotation,
            items: saved_items,
        }))
    }

    pub async fn set_quotation_status(
        &self,
        id: Uuid,
        status: QuotationStatus,
    ) -> Result<Option<Quotation>, AppError> {
        let quotation = sqlx::query_as::<_, Quotation>(
            "UPDATE quotations SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quotation)
    }

    pub async fn delete_quotation(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

async fn insert_invoice_items(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    items: &[ItemInput],
) -> Result<Vec<DocumentItem>, AppError> {
    let mut saved = Vec::with_capacity(items.len());
    for item in items {
        let row = sqlx::query_as::<_, DocumentItem>(&format!(
            r#"
            INSERT INTO invoice_items (invoice_id, product_id, description, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(invoice_id)
        .bind(item.product_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(totals::line_total(item))
        .fetch_one(&mut **tx)
        .await?;
        saved.push(row);
    }
    Ok(saved)
}

async fn insert_quotation_items(
    tx: &mut Transaction<'_, Postgres>,
    quotation_id: Uuid,
    items: &[ItemInput],
) -> Result<Vec<DocumentItem>, AppError> {
    let mut saved = Vec::with_capacity(items.len());
    for item in items {
        let row = sqlx::query_as::<_, DocumentItem>(&format!(
            r#"
            INSERT INTO quotation_items (quotation_id, product_id, description, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(quotation_id)
        .bind(item.product_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(totals::line_total(item))
        .fetch_one(&mut **tx)
        .await?;
        saved.push(row);
    }
    Ok(saved)
}
