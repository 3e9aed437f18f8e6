// src/db/client_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::clients::Client};

// Repository for the 'clients' table.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_name: &str,
        company_email: &str,
        contact_person: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (company_name, company_email, contact_person, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(company_name)
        .bind(company_email)
        .bind(contact_person)
        .bind(phone)
        .bind(address)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(client)
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY company_name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_name: &str,
        company_email: &str,
        contact_person: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET company_name = $2,
                company_email = $3,
                contact_person = $4,
                phone = $5,
                address = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_name)
        .bind(company_email)
        .bind(contact_person)
        .bind(phone)
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(client)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_unique_email(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(
                "A client with this e-mail already exists.".to_string(),
            );
        }
    }
    e.into()
}
