// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::settings::CompanySettings};

// Repository for the single-row company profile. The row is seeded by the
// initial migration, so reads can always expect it to exist.
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_settings(&self) -> Result<CompanySettings, AppError> {
        let settings =
            sqlx::query_as::<_, CompanySettings>("SELECT * FROM company_settings WHERE id = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(settings)
    }

    pub async fn update_settings(
        &self,
        company_name: &str,
        tax_pin: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        payment_account: Option<&str>,
    ) -> Result<CompanySettings, AppError> {
        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            UPDATE company_settings
            SET company_name = $1,
                tax_pin = $2,
                address = $3,
                phone = $4,
                email = $5,
                payment_account = $6,
                updated_at = now()
            WHERE id = 1
            RETURNING *
            "#,
        )
        .bind(company_name)
        .bind(tax_pin)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(payment_account)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
