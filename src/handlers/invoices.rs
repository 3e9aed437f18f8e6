// src/handlers/invoices.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::billing::{
        validate_not_negative, validate_positive, validate_vat_rate, Invoice, InvoiceDetail,
        InvoiceStatus, ItemInput,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub client_id: Option<Uuid>,

    // Absolute currency amount, not a percentage.
    #[validate(custom(function = validate_not_negative))]
    pub discount: Option<Decimal>,

    #[validate(custom(function = validate_vat_rate))]
    pub vat_rate: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2026-09-30")]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,

    #[validate(nested)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: InvoiceStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    #[validate(custom(function = validate_positive))]
    pub amount: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = InvoicePayload,
    responses(
        (status = 201, description = "Invoice created with computed totals", body = InvoiceDetail),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .billing_service
        .create_invoice(
            payload.client_id,
            payload.discount,
            payload.vat_rate,
            payload.due_date,
            payload.notes.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    responses((status = 200, description = "All invoices, newest first", body = Vec<Invoice>))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.billing_service.list_invoices().await?;

    Ok((StatusCode::OK, Json(invoices)))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice with line items", body = InvoiceDetail),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.get_invoice_detail(id).await?;

    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    request_body = InvoicePayload,
    responses(
        (status = 200, description = "Invoice updated, totals recomputed", body = InvoiceDetail),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .billing_service
        .update_invoice(
            id,
            payload.client_id,
            payload.discount,
            payload.vat_rate,
            payload.due_date,
            payload.notes.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    patch,
    path = "/api/invoices/{id}/status",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Invoice),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn set_invoice_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .billing_service
        .set_invoice_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    post,
    path = "/api/invoices/{id}/payments",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    request_body = PaymentPayload,
    responses(
        (status = 200, description = "Payment recorded; status flips to paid when fully covered", body = Invoice),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state
        .billing_service
        .record_payment(id, payload.amount)
        .await?;

    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_invoice(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
