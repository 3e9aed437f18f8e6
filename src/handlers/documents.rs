// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

#[utoipa::path(
    get,
    path = "/api/invoices/{id}/pdf",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice as PDF", content_type = "application/pdf"),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn invoice_pdf(
    State(app_state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generate_invoice_pdf(invoice_id)
        .await?;

    // Headers so the browser downloads the file.
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"invoice_{}.pdf\"", invoice_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/quotations/{id}/pdf",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "Quotation id")),
    responses(
        (status = 200, description = "Quotation as PDF", content_type = "application/pdf"),
        (status = 404, description = "Quotation not found")
    )
)]
pub async fn quotation_pdf(
    State(app_state): State<AppState>,
    Path(quotation_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generate_quotation_pdf(quotation_id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"quotation_{}.pdf\"", quotation_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
