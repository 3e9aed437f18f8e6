// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::settings::CompanySettings};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[validate(length(min = 1, message = "The company name is required."))]
    pub company_name: String,

    pub tax_pin: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "The e-mail is invalid."))]
    pub email: Option<String>,

    pub payment_account: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Company profile", body = CompanySettings))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get_settings().await?;

    Ok((StatusCode::OK, Json(settings)))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    responses(
        (status = 200, description = "Company profile updated", body = CompanySettings),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state
        .settings_repo
        .update_settings(
            &payload.company_name,
            payload.tax_pin.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.payment_account.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}
