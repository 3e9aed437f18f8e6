// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::catalog_repo::VariantInput,
    models::{
        billing::validate_not_negative,
        catalog::ProductWithVariants,
    },
};

// Serialize is needed because the length check on `ProductPayload.variants`
// records the offending value in the validation error params.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    #[validate(length(min = 1, message = "The variant size is required."))]
    pub size: String,

    #[validate(length(min = 1, message = "The variant unit is required."))]
    pub unit: String,

    #[validate(custom(function = validate_not_negative))]
    pub cost_price: Option<Decimal>,

    #[validate(custom(function = validate_not_negative))]
    pub selling_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "The product name is required."))]
    pub name: String,

    pub product_type: Option<String>,
    pub description: Option<String>,

    #[validate(length(min = 1, message = "At least one variant is required."), nested)]
    pub variants: Vec<VariantPayload>,
}

impl ProductPayload {
    fn variant_inputs(&self) -> Vec<VariantInput> {
        self.variants
            .iter()
            .map(|v| VariantInput {
                size: v.size.clone(),
                unit: v.unit.clone(),
                cost_price: v.cost_price,
                selling_price: v.selling_price,
            })
            .collect()
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductWithVariants),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            &payload.name,
            payload.product_type.as_deref(),
            payload.description.as_deref(),
            &payload.variant_inputs(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "All products with variants", body = Vec<ProductWithVariants>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_service.list_products().await?;

    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductWithVariants),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(id).await?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductWithVariants),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            id,
            &payload.name,
            payload.product_type.as_deref(),
            payload.description.as_deref(),
            &payload.variant_inputs(),
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn variant() -> VariantPayload {
        VariantPayload {
            size: "5".to_string(),
            unit: "litre".to_string(),
            cost_price: None,
            selling_price: dec!(1100),
        }
    }

    fn payload(variants: Vec<VariantPayload>) -> ProductPayload {
        ProductPayload {
            name: "Sunflower Cooking Oil".to_string(),
            product_type: None,
            description: None,
            variants,
        }
    }

    #[test]
    fn rejects_empty_variant_list() {
        let errors = payload(vec![]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("variants"));
    }

    #[test]
    fn accepts_product_with_one_variant() {
        assert!(payload(vec![variant()]).validate().is_ok());
    }

    #[test]
    fn rejects_negative_variant_price() {
        let mut bad = variant();
        bad.selling_price = dec!(-1);
        assert!(payload(vec![bad]).validate().is_err());
    }
}
