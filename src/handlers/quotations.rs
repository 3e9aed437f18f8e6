// src/handlers/quotations.rs

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
        validate_not_negative, validate_vat_rate, InvoiceDetail, ItemInput, Quotation,
        QuotationDetail,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPayload {
    pub client_id: Option<Uuid>,

    // Absolute currency amount, not a percentage.
    #[validate(custom(function = validate_not_negative))]
    pub discount: Option<Decimal>,

    #[validate(custom(function = validate_vat_rate))]
    pub vat_rate: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2026-09-15")]
    pub valid_until: Option<NaiveDate>,

    pub notes: Option<String>,

    #[validate(nested)]
    pub items: Vec<ItemInput>,
}

#[utoipa::path(
    post,
    path = "/api/quotations",
    tag = "Quotations",
    request_body = QuotationPayload,
    responses(
        (status = 201, description = "Quotation created with computed totals", body = QuotationDetail),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_quotation(
    State(app_state): State<AppState>,
    Json(payload): Json<QuotationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quotation = app_state
        .billing_service
        .create_quotation(
            payload.client_id,
            payload.discount,
            payload.vat_rate,
            payload.valid_until,
            payload.notes.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(quotation)))
}

#[utoipa::path(
    get,
    path = "/api/quotations",
    tag = "Quotations",
    responses((status = 200, description = "All quotations, newest first", body = Vec<Quotation>))
)]
pub async fn list_quotations(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let quotations = app_state.billing_service.list_quotations().await?;

    Ok((StatusCode::OK, Json(quotations)))
}

#[utoipa::path(
    get,
    path = "/api/quotations/{id}",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "Quotation id")),
    responses(
        (status = 200, description = "Quotation with line items", body = QuotationDetail),
        (status = 404, description = "Quotation not found")
    )
)]
pub async fn get_quotation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = app_state.billing_service.get_quotation_detail(id).await?;

    Ok((StatusCode::OK, Json(quotation)))
}

#[utoipa::path(
    put,
    path = "/api/quotations/{id}",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "Quotation id")),
    request_body = QuotationPayload,
    responses(
        (status = 200, description = "Quotation updated, totals recomputed", body = QuotationDetail),
        (status = 404, description = "Quotation not found")
    )
)]
pub async fn update_quotation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuotationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quotation = app_state
        .billing_service
        .update_quotation(
            id,
            payload.client_id,
            payload.discount,
            payload.vat_rate,
            payload.valid_until,
            payload.notes.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::OK, Json(quotation)))
}

#[utoipa::path(
    delete,
    path = "/api/quotations/{id}",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "Quotation id")),
    responses(
        (status = 204, description = "Quotation deleted"),
        (status = 404, description = "Quotation not found")
    )
)]
pub async fn delete_quotation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_quotation(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/quotations/{id}/convert",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "Quotation id")),
    responses(
        (status = 201, description = "Draft invoice created from the quotation", body = InvoiceDetail),
        (status = 404, description = "Quotation not found")
    )
)]
pub async fn convert_quotation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .billing_service
        .convert_quotation_to_invoice(id)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}
